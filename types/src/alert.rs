use serde::{Deserialize, Serialize};

use crate::{Amount, MemberId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Overdue,
    HighBalance,
    Inactive,
}

impl AlertKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overdue => "Payment Overdue",
            Self::HighBalance => "High Balance",
            Self::Inactive => "Inactive User",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    pub kind: AlertKind,
    pub member_id: MemberId,
    pub member_name: String,
    pub amount: Amount,
    pub days_since_payment: u32,
    pub risk: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSettings {
    pub overdue_threshold_days: u32,
    pub high_risk_threshold: Amount,
    pub auto_alerts: bool,
}

impl Default for AlertSettings {
    fn default() -> Self {
        Self {
            overdue_threshold_days: 30,
            high_risk_threshold: Amount::from_rupees(5000),
            auto_alerts: true,
        }
    }
}

impl AlertSettings {
    /// Whether `alert` is still raised under these thresholds.
    pub fn raises(&self, alert: &Alert) -> bool {
        match alert.kind {
            AlertKind::Overdue | AlertKind::Inactive => {
                alert.days_since_payment >= self.overdue_threshold_days
            }
            AlertKind::HighBalance => alert.amount >= self.high_risk_threshold,
        }
    }

    /// Raised alerts, riskiest first.
    pub fn apply(&self, alerts: &[Alert]) -> Vec<Alert> {
        let mut raised: Vec<Alert> = alerts.iter().filter(|a| self.raises(a)).cloned().collect();
        raised.sort_by(|a, b| b.risk.cmp(&a.risk).then(b.amount.cmp(&a.amount)));
        raised
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertOverview {
    pub alerts: Vec<Alert>,
    pub settings: AlertSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: u32, kind: AlertKind, rupees: i64, days: u32, risk: RiskLevel) -> Alert {
        Alert {
            id,
            kind,
            member_id: MemberId(100 + id),
            member_name: format!("Member {id}"),
            amount: Amount::from_rupees(rupees),
            days_since_payment: days,
            risk,
        }
    }

    #[test]
    fn thresholds_filter_and_order_alerts() {
        let alerts = [
            alert(1, AlertKind::Overdue, 8500, 45, RiskLevel::High),
            alert(2, AlertKind::Overdue, 6200, 20, RiskLevel::Medium),
            alert(3, AlertKind::HighBalance, 12_500, 15, RiskLevel::High),
            alert(4, AlertKind::HighBalance, 3000, 15, RiskLevel::Low),
            alert(5, AlertKind::Inactive, 3200, 60, RiskLevel::Medium),
        ];

        let raised = AlertSettings::default().apply(&alerts);
        let ids: Vec<u32> = raised.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 1, 5]);
    }
}
