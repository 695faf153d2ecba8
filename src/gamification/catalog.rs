//! Built-in badge catalog and challenge templates.

use super::types::{BadgeDefinition, BadgeMetric, ChallengeMetric, ChallengePeriod};

/// Current version of the built-in badge catalog.
pub const CATALOG_VERSION: u32 = 1;

/// Immutable, versioned list of badge definitions.
#[derive(Debug, Clone)]
pub struct BadgeCatalog {
    version: u32,
    badges: Vec<BadgeDefinition>,
}

impl BadgeCatalog {
    /// Build a catalog from explicit definitions.
    pub fn new(version: u32, badges: Vec<BadgeDefinition>) -> Self {
        Self { version, badges }
    }

    /// The catalog shipped with the application.
    pub fn builtin() -> Self {
        Self::new(CATALOG_VERSION, default_badges())
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn get(&self, badge_id: &str) -> Option<&BadgeDefinition> {
        self.badges.iter().find(|b| b.id == badge_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BadgeDefinition> {
        self.badges.iter()
    }

    pub fn len(&self) -> usize {
        self.badges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.badges.is_empty()
    }
}

impl Default for BadgeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn badge(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    requirement: f64,
    metric: BadgeMetric,
    color: &str,
) -> BadgeDefinition {
    BadgeDefinition {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        requirement,
        metric,
        color: color.to_string(),
    }
}

/// Default badge definitions.
pub fn default_badges() -> Vec<BadgeDefinition> {
    vec![
        badge(
            "first_entry",
            "Getting Started",
            "Log your first waste entry",
            "leaf-outline",
            1.0,
            BadgeMetric::Entries,
            "#10b981",
        ),
        badge(
            "eco_warrior",
            "Eco Warrior",
            "Log 10 waste entries",
            "shield-checkmark",
            10.0,
            BadgeMetric::Entries,
            "#3b82f6",
        ),
        badge(
            "waste_master",
            "Waste Master",
            "Log 50 waste entries",
            "trophy",
            50.0,
            BadgeMetric::Entries,
            "#f59e0b",
        ),
        badge(
            "point_collector",
            "Point Collector",
            "Earn 500 points",
            "star",
            500.0,
            BadgeMetric::Points,
            "#f59e0b",
        ),
        badge(
            "point_master",
            "Point Master",
            "Earn 2000 points",
            "star",
            2000.0,
            BadgeMetric::Points,
            "#ef4444",
        ),
        badge(
            "streak_starter",
            "Streak Starter",
            "Maintain a 3-day streak",
            "flame",
            3.0,
            BadgeMetric::Streak,
            "#f97316",
        ),
        badge(
            "streak_legend",
            "Streak Legend",
            "Maintain a 7-day streak",
            "flame",
            7.0,
            BadgeMetric::Streak,
            "#dc2626",
        ),
        badge(
            "early_adopter",
            "Early Adopter",
            "Be one of the first users",
            "rocket",
            1.0,
            BadgeMetric::Special,
            "#8b5cf6",
        ),
    ]
}

/// Blueprint a challenge is instantiated from at a period boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct ChallengeTemplate {
    /// Stable key, part of the generated challenge id.
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub period: ChallengePeriod,
    pub metric: ChallengeMetric,
    pub goal: f64,
    pub reward: u32,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Default challenge templates for every period.
pub fn default_challenge_templates() -> Vec<ChallengeTemplate> {
    vec![
        ChallengeTemplate {
            key: "logger",
            name: "Daily Logger",
            description: "Log 3 waste entries today",
            period: ChallengePeriod::Daily,
            metric: ChallengeMetric::Entries,
            goal: 3.0,
            reward: 50,
            icon: "checkmark-circle",
            color: "#10b981",
        },
        ChallengeTemplate {
            key: "point_hunter",
            name: "Point Hunter",
            description: "Earn 100 points today",
            period: ChallengePeriod::Daily,
            metric: ChallengeMetric::Points,
            goal: 100.0,
            reward: 75,
            icon: "star",
            color: "#f59e0b",
        },
        ChallengeTemplate {
            key: "recycler",
            name: "Weekly Recycler",
            description: "Log 15 waste entries this week",
            period: ChallengePeriod::Weekly,
            metric: ChallengeMetric::Entries,
            goal: 15.0,
            reward: 200,
            icon: "repeat",
            color: "#3b82f6",
        },
        ChallengeTemplate {
            key: "point_drive",
            name: "Weekly Point Drive",
            description: "Earn 500 points this week",
            period: ChallengePeriod::Weekly,
            metric: ChallengeMetric::Points,
            goal: 500.0,
            reward: 250,
            icon: "trending-up",
            color: "#8b5cf6",
        },
        ChallengeTemplate {
            key: "champion",
            name: "Monthly Champion",
            description: "Log 60 waste entries this month",
            period: ChallengePeriod::Monthly,
            metric: ChallengeMetric::Entries,
            goal: 60.0,
            reward: 750,
            icon: "medal",
            color: "#dc2626",
        },
    ]
}
