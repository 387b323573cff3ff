//! # 時刻プロバイダ
//!
//! 投稿の `datePublished` / `lastUpdated` の設定と、欠損した公開日時の補完に使う現在時刻。
//! テストでは [`FixedClock`] か独自実装を注入して時刻を制御する。

use chrono::{DateTime, SubsecRound, Utc};

/// 現在時刻を返す
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// システム時刻
///
/// レコードのタイムスタンプはミリ秒精度のため、それより下を切り捨てる。
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// 常に同じ時刻を返す
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
