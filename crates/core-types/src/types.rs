// In crates/core-types/src/types.rs

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The direction of a journaled trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    #[default]
    Buy,
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

/// How a trade was closed, as recorded by the trader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TradeStatus {
    #[serde(rename = "TP")]
    TakeProfit,
    #[serde(rename = "SL")]
    StopLoss,
    #[serde(rename = "BE")]
    Breakeven,
    #[default]
    #[serde(rename = "open")]
    Open,
}

impl TradeStatus {
    /// True when the trade was closed by its planned target or stop.
    pub fn is_planned_exit(&self) -> bool {
        matches!(self, TradeStatus::TakeProfit | TradeStatus::StopLoss)
    }
}

impl FromStr for TradeStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "TP" => Ok(TradeStatus::TakeProfit),
            "SL" => Ok(TradeStatus::StopLoss),
            "BE" => Ok(TradeStatus::Breakeven),
            "open" => Ok(TradeStatus::Open),
            other => Err(Error::InvalidField {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AssetCategory {
    Forex,
    Crypto,
    Stocks,
    Indices,
    Commodities,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Forex => "Forex",
            AssetCategory::Crypto => "Crypto",
            AssetCategory::Stocks => "Stocks",
            AssetCategory::Indices => "Indices",
            AssetCategory::Commodities => "Commodities",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forex" => Ok(AssetCategory::Forex),
            "crypto" => Ok(AssetCategory::Crypto),
            "stocks" => Ok(AssetCategory::Stocks),
            "indices" => Ok(AssetCategory::Indices),
            "commodities" => Ok(AssetCategory::Commodities),
            _ => Err(Error::InvalidField {
                field: "assetCategory",
                value: s.to_string(),
            }),
        }
    }
}

/// A single journaled trade, as entered by the user.
///
/// Prices and profit are kept as `Decimal`; the optional ratios are `None`
/// when the trader did not track them. A stop loss or take profit of zero
/// means "not set".
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Trade {
    pub id: String,
    pub date: String,
    pub time: String,
    pub symbol: String,
    #[serde(rename = "type")]
    pub trade_type: TradeSide,
    pub entry: Decimal,
    pub exit: Decimal,
    pub sl: Decimal,
    pub tp: Decimal,
    pub lot_size: Option<f64>,
    pub risk_percent: Option<f64>,
    pub rr_planned: Option<f64>,
    pub rr_actual: Option<f64>,
    pub pips_profit: Option<f64>,
    pub profit: Decimal,
    pub status: TradeStatus,
    pub asset_category: Option<AssetCategory>,
    pub notes: String,
    pub emotion_before: Option<String>,
    pub emotion_after: Option<String>,
    pub mistakes: Vec<String>,
    pub strategy: String,
    pub session: String,
    pub screenshot: Option<String>,
    pub rules_used: Vec<String>,
}

impl Trade {
    pub fn profit_f64(&self) -> f64 {
        self.profit.to_f64().unwrap_or(0.0)
    }

    pub fn is_win(&self) -> bool {
        self.profit > Decimal::ZERO
    }

    pub fn is_loss(&self) -> bool {
        self.profit < Decimal::ZERO
    }

    pub fn has_stop_loss(&self) -> bool {
        self.sl > Decimal::ZERO
    }

    pub fn has_take_profit(&self) -> bool {
        self.tp > Decimal::ZERO
    }

    pub fn has_strategy(&self) -> bool {
        !self.strategy.trim().is_empty()
    }

    /// The trimmed strategy name, if one was recorded.
    pub fn strategy_name(&self) -> Option<&str> {
        let name = self.strategy.trim();
        (!name.is_empty()).then_some(name)
    }

    /// The trimmed session name, if one was recorded.
    pub fn session_name(&self) -> Option<&str> {
        let name = self.session.trim();
        (!name.is_empty()).then_some(name)
    }

    pub fn emotion_before_label(&self) -> Option<&str> {
        non_empty(self.emotion_before.as_deref())
    }

    pub fn emotion_after_label(&self) -> Option<&str> {
        non_empty(self.emotion_after.as_deref())
    }

    /// Tracked risk percentage; zero and absent values count as untracked.
    pub fn tracked_risk(&self) -> Option<f64> {
        self.risk_percent.filter(|r| r.is_finite() && *r > 0.0)
    }

    /// Tracked planned R:R; zero and absent values count as untracked.
    pub fn tracked_rr_planned(&self) -> Option<f64> {
        self.rr_planned.filter(|rr| rr.is_finite() && *rr > 0.0)
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }

    pub fn parsed_time(&self) -> Option<NaiveTime> {
        let time = self.time.trim();
        NaiveTime::parse_from_str(time, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
            .ok()
    }

    /// The entry hour (0-23) taken from the leading component of `time`.
    pub fn hour(&self) -> Option<u32> {
        if let Some(time) = self.parsed_time() {
            return Some(time.hour());
        }
        let head = self.time.trim().split(':').next()?;
        head.trim().parse::<u32>().ok().filter(|h| *h < 24)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A named trading window that groups trades.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub session_type: String,
    pub date: String,
    pub timezone: String,
    pub strategy_name: Option<String>,
    pub initial_capital: Option<Decimal>,
}

impl Session {
    /// Whether a trade's session label refers to this session.
    ///
    /// Session links are matched on the trimmed name, ignoring case.
    pub fn matches(&self, trade: &Trade) -> bool {
        trade
            .session_name()
            .is_some_and(|name| name.eq_ignore_ascii_case(self.name.trim()))
    }
}
