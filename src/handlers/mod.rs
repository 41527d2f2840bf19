// handlers/mod.rs - route handlers grouped by surface
//
// public:   views, health and login
// board:    notification / anonymous post boards, one handler set for both
// comments: comment rows and likes
pub mod board;
pub mod comments;
pub mod public;
