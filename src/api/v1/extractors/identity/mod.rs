/*!
 * Identity extractor
 *
 * Responsibility:
 * - 確立済みの VerifiedIdentity を handler に渡す
 * - middleware が extensions に insert 済みである前提 (なければ配線ミス)
 *
 * Public API:
 * - Identity
 */

mod core;

pub use core::Identity;
