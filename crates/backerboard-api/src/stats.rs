use serde::{Deserialize, Serialize};

/// Aggregate statistics for one project, fetched fresh per selection —
/// never cached, so the dashboard charts always redraw from live data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectStatsEnvelope {
    pub cumulative_stats: CumulativeStats,
    pub funding_distribution: Vec<FundingDateStats>,
    pub referral_distribution: Vec<ReferrerStats>,
    pub reward_distribution: Vec<RewardStats>,
    pub video_stats: Option<VideoStats>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CumulativeStats {
    pub average_pledge: f64,
    pub backers_count: u32,
    pub goal: u32,
    pub percent_raised: f64,
    pub pledged: u32,
}

/// One point on the funding-over-time chart.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingDateStats {
    /// Seconds since the epoch for the day this point covers.
    pub date: u64,
    pub backers_count: u32,
    pub cumulative_backers_count: u32,
    pub cumulative_pledged: u32,
    pub pledged: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferrerStats {
    pub code: String,
    pub referrer_name: String,
    pub backers_count: u32,
    pub pledged: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardStats {
    pub reward_id: u64,
    pub backers_count: u32,
    pub minimum: Option<u32>,
    pub pledged: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStats {
    pub external_completions: u32,
    pub external_starts: u32,
    pub internal_completions: u32,
    pub internal_starts: u32,
}
