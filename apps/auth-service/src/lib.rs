//! # edgeblog Auth Service ライブラリ
//!
//! サインアップとログインを提供する認証サービスのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: Router の組み立て
//! - `config`: 環境変数からの設定読み込み
//! - `error`: サービス固有のエラーと HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `middleware`: CORS ミドルウェア
//! - `usecase`: ビジネスロジック

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod usecase;
