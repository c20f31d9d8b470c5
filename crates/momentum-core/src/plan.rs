//! Built-in master plan: the one-year goal frame, default daily schedule,
//! default habits, and the roadmap used to seed a fresh store.
//!
//! Users edit the seeded rows through the store afterwards; this module is
//! only the starting point and the source for day numbering and quotes.

use chrono::NaiveDate;

use crate::model::{SlotCategory, WeekStatus};

/// Target numbers the plan drives toward, as display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanGoals {
    pub monthly_revenue: &'static str,
    pub followers_instagram: &'static str,
    pub followers_youtube: &'static str,
    pub products_live: u32,
}

/// The one-year plan frame.
#[derive(Debug, Clone, Copy)]
pub struct Plan {
    /// First day of the plan
    pub start_date: NaiveDate,
    /// Last day of the plan (inclusive)
    pub end_date: NaiveDate,
    /// End-state goals
    pub goals: PlanGoals,
    /// Rotating daily quotes
    pub quotes: &'static [&'static str],
}

const QUOTES: &[&str] = &[
    "Consistency > Intensity",
    "Build First, Content Second",
    "Done > Perfect",
    "Revenue > Vanity Metrics",
    "You have 14 days left in 2025 to start your comeback.",
    "The only difference: Did you start today?",
];

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

impl Plan {
    /// The built-in one-year plan.
    pub fn builtin() -> Self {
        Self {
            start_date: ymd(2025, 12, 17),
            end_date: ymd(2026, 12, 16),
            goals: PlanGoals {
                monthly_revenue: "₹10,00,000/month",
                followers_instagram: "1,000,000",
                followers_youtube: "500,000",
                products_live: 8,
            },
            quotes: QUOTES,
        }
    }

    /// Total length of the plan in days (inclusive of both ends).
    pub fn length_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// 1-based day number of `today` within the plan, clamped to the plan
    /// range so days before the start read as day 1 and days after the end
    /// as the final day.
    pub fn day_number(&self, today: NaiveDate) -> i64 {
        let raw = (today - self.start_date).num_days() + 1;
        raw.clamp(1, self.length_days())
    }

    /// Quote for a given day number, rotating through the list.
    pub fn quote_of_day(&self, day_number: i64) -> &'static str {
        if self.quotes.is_empty() {
            return "";
        }
        let index = day_number.rem_euclid(self.quotes.len() as i64) as usize;
        self.quotes[index]
    }
}

impl Default for Plan {
    fn default() -> Self {
        Self::builtin()
    }
}

/// One block of the default daily schedule.
#[derive(Debug, Clone, Copy)]
pub struct PlanSlot {
    pub start_time: &'static str,
    pub end_time: &'static str,
    pub activity: &'static str,
    pub category: SlotCategory,
}

/// One week of the default roadmap.
#[derive(Debug, Clone, Copy)]
pub struct PlanWeek {
    pub week_number: i64,
    pub title: &'static str,
    pub status: WeekStatus,
}

/// One month of the default roadmap.
#[derive(Debug, Clone)]
pub struct PlanMonth {
    pub month_number: i64,
    pub title: &'static str,
    pub focus_area: &'static str,
    pub revenue_target: &'static str,
    pub weeks: Vec<PlanWeek>,
}

/// The default daily schedule, in start-time order.
pub fn default_schedule() -> Vec<PlanSlot> {
    use SlotCategory::*;
    vec![
        PlanSlot { start_time: "04:45", end_time: "05:15", activity: "Wake Up + Hydrate", category: Health },
        PlanSlot { start_time: "05:15", end_time: "06:30", activity: "Workout (Str/Cardio)", category: Health },
        PlanSlot { start_time: "06:30", end_time: "09:00", activity: "DEEP WORK 1: Core Build", category: Build },
        PlanSlot { start_time: "09:00", end_time: "11:30", activity: "Day Job", category: Job },
        PlanSlot { start_time: "11:30", end_time: "12:00", activity: "Walk + Creativity", category: Health },
        PlanSlot { start_time: "12:00", end_time: "14:00", activity: "DEEP WORK 2: Build + Record", category: Build },
        PlanSlot { start_time: "14:00", end_time: "15:00", activity: "Social Engagement", category: Social },
        PlanSlot { start_time: "15:00", end_time: "19:30", activity: "Learning Rotation", category: Learn },
        PlanSlot { start_time: "19:30", end_time: "22:30", activity: "Planning & Review", category: Admin },
        PlanSlot { start_time: "22:30", end_time: "04:45", activity: "Sleep", category: Health },
    ]
}

/// The default habit names.
pub fn default_habits() -> &'static [&'static str] {
    &[
        "5 Hours Deep Work",
        "Post on Instagram",
        "Post on LinkedIn/Twitter",
        "Workout (45m+)",
        "No Sugar / Clean Diet",
        "Read 10 Pages",
        "Plan Tomorrow",
    ]
}

/// The default roadmap months with their weekly breakdown.
pub fn default_roadmap() -> Vec<PlanMonth> {
    vec![
        PlanMonth {
            month_number: 1,
            title: "Month 1: Foundation & Browser",
            focus_area: "Full-stack + Agentic Browser",
            revenue_target: "₹50k",
            weeks: vec![
                PlanWeek { week_number: 1, title: "TypeScript & Tooling", status: WeekStatus::Current },
                PlanWeek { week_number: 2, title: "Next.js App Router + Auth", status: WeekStatus::Pending },
                PlanWeek { week_number: 3, title: "Multi-Agent Orchestration", status: WeekStatus::Pending },
                PlanWeek { week_number: 4, title: "DevOps + First Launch", status: WeekStatus::Pending },
            ],
        },
        PlanMonth {
            month_number: 2,
            title: "Month 2: Finance AI",
            focus_area: "Trading Platform & Infra",
            revenue_target: "₹1.5L",
            weeks: vec![
                PlanWeek { week_number: 5, title: "Trading Data Infrastructure", status: WeekStatus::Pending },
                PlanWeek { week_number: 6, title: "Strategy Builder + Backtesting", status: WeekStatus::Pending },
                PlanWeek { week_number: 7, title: "Auto Trader + Risk Agent", status: WeekStatus::Pending },
                PlanWeek { week_number: 8, title: "Trading Platform Launch", status: WeekStatus::Pending },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn plan_spans_one_year() {
        let plan = Plan::builtin();
        assert_eq!(plan.length_days(), 365);
    }

    #[test]
    fn day_number_counts_from_start() {
        let plan = Plan::builtin();
        assert_eq!(plan.day_number(date(2025, 12, 17)), 1);
        assert_eq!(plan.day_number(date(2025, 12, 18)), 2);
        assert_eq!(plan.day_number(date(2026, 12, 16)), 365);
    }

    #[test]
    fn day_number_clamps_outside_the_plan() {
        let plan = Plan::builtin();
        assert_eq!(plan.day_number(date(2025, 11, 1)), 1);
        assert_eq!(plan.day_number(date(2027, 3, 1)), 365);
    }

    #[test]
    fn quotes_rotate_by_day_number() {
        let plan = Plan::builtin();
        let n = plan.quotes.len() as i64;
        assert_eq!(plan.quote_of_day(1), plan.quote_of_day(1 + n));
        assert_ne!(plan.quote_of_day(1), plan.quote_of_day(2));
    }

    #[test]
    fn default_schedule_matches_slot_count_and_order() {
        let slots = default_schedule();
        assert_eq!(slots.len(), 10);
        for pair in slots.windows(2) {
            assert!(pair[0].start_time < pair[1].start_time);
        }
    }

    #[test]
    fn default_roadmap_has_one_current_week() {
        let current: usize = default_roadmap()
            .iter()
            .flat_map(|m| m.weeks.iter())
            .filter(|w| w.status == WeekStatus::Current)
            .count();
        assert_eq!(current, 1);
    }
}
