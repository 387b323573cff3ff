//! # edgeblog Blog Service ライブラリ
//!
//! ブログ投稿の CRUD とサイトマップを提供するブログサービスのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `api_key`: 書き込み系リクエストの API キー検証
//! - `app_builder`: Router の組み立て
//! - `config`: 環境変数からの設定読み込み
//! - `error`: サービス固有のエラーと HTTP レスポンスへの変換
//! - `extract`: パスからのスラッグ抽出
//! - `handler`: HTTP ハンドラ
//! - `middleware`: CORS ミドルウェア
//! - `seed`: サンプル投稿の投入
//! - `usecase`: ビジネスロジック、サイトマップ生成

pub mod api_key;
pub mod app_builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod middleware;
pub mod seed;
pub mod usecase;
