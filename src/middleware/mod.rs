/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: 認証 gate, cors: browser 向け CORS, http: request-id / trace / limit / timeout
 */
pub mod auth;
pub mod cors;
pub mod http;
