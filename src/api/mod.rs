/*
 * Responsibility
 * - API バージョンの公開ポイント
 */
pub mod v1;
