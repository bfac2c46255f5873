//! Daily motivational tips.
//!
//! The tip of the day cycles through the list by day of the year, so the
//! same tip is shown all day and consecutive days differ.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TipCategory {
    Motivation,
    Nutrition,
    Technique,
    Recovery,
    Planning,
    Mental,
}

impl TipCategory {
    pub fn name(&self) -> &'static str {
        match self {
            TipCategory::Motivation => "motivation",
            TipCategory::Nutrition => "nutrition",
            TipCategory::Technique => "technique",
            TipCategory::Recovery => "recovery",
            TipCategory::Planning => "planning",
            TipCategory::Mental => "mental",
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Tip {
    pub category: TipCategory,
    pub text: &'static str,
}

pub const TIPS: &[Tip] = &[
    Tip {
        category: TipCategory::Motivation,
        text: "Consistency over intensity. It's better to work out for 20 minutes every day than 2 hours once a week.",
    },
    Tip {
        category: TipCategory::Nutrition,
        text: "Stay hydrated! Drink water before, during, and after your workout for optimal performance.",
    },
    Tip {
        category: TipCategory::Technique,
        text: "Focus on your breath during exercise. Proper breathing improves performance and reduces injury risk.",
    },
    Tip {
        category: TipCategory::Recovery,
        text: "Rest days are growth days. Your muscles need time to recover and grow stronger.",
    },
    Tip {
        category: TipCategory::Motivation,
        text: "Small progress is still progress. Celebrate the little victories on your fitness journey.",
    },
    Tip {
        category: TipCategory::Technique,
        text: "Proper form prevents injury. It's better to do fewer reps correctly than many with poor form.",
    },
    Tip {
        category: TipCategory::Nutrition,
        text: "Fuel your body with whole foods. Think of food as fuel, not reward or punishment.",
    },
    Tip {
        category: TipCategory::Planning,
        text: "Set SMART goals: Specific, Measurable, Achievable, Relevant, Time-bound.",
    },
    Tip {
        category: TipCategory::Motivation,
        text: "Find workout buddies. Social support increases adherence to fitness routines by 95%.",
    },
    Tip {
        category: TipCategory::Recovery,
        text: "Sleep is essential for recovery. Aim for 7-9 hours of quality sleep each night.",
    },
    Tip {
        category: TipCategory::Motivation,
        text: "Your only competition is yourself. Focus on beating your previous best.",
    },
    Tip {
        category: TipCategory::Technique,
        text: "Stretching improves flexibility and reduces risk of injury. Don't skip it!",
    },
    Tip {
        category: TipCategory::Nutrition,
        text: "Protein helps repair muscles after workouts. Aim for 1.6-2.2g per kg of bodyweight daily.",
    },
    Tip {
        category: TipCategory::Mental,
        text: "Mental fitness is as important as physical. Practice mindfulness during exercise.",
    },
    Tip {
        category: TipCategory::Planning,
        text: "Change your routine every 4-6 weeks to prevent plateaus and maintain progress.",
    },
    Tip {
        category: TipCategory::Planning,
        text: "Track your progress. What gets measured, gets managed.",
    },
    Tip {
        category: TipCategory::Motivation,
        text: "The best workout is the one you'll actually do consistently. Find activities you enjoy!",
    },
    Tip {
        category: TipCategory::Technique,
        text: "Warm up properly to prepare your body for exercise and reduce injury risk.",
    },
    Tip {
        category: TipCategory::Mental,
        text: "Remember your 'why' when motivation fades. Connect with your deeper purpose.",
    },
    Tip {
        category: TipCategory::Nutrition,
        text: "Balanced nutrition supports optimal performance. Aim for a variety of colorful foods.",
    },
    Tip {
        category: TipCategory::Recovery,
        text: "Stress management is crucial for fitness. High stress can impair recovery.",
    },
    Tip {
        category: TipCategory::Technique,
        text: "Listen to your body. There's a difference between challenging yourself and risking injury.",
    },
    Tip {
        category: TipCategory::Motivation,
        text: "Focus on progress, not perfection. Fitness is a lifelong journey.",
    },
    Tip {
        category: TipCategory::Planning,
        text: "Prioritize compound exercises that work multiple muscle groups for efficient workouts.",
    },
    Tip {
        category: TipCategory::Mental,
        text: "Visualize success. Mental rehearsal can improve physical performance.",
    },
    Tip {
        category: TipCategory::Nutrition,
        text: "Post-workout nutrition is key. Consume protein and carbs within 30-60 minutes after exercise.",
    },
    Tip {
        category: TipCategory::Planning,
        text: "Challenge yourself but be realistic. Gradual progression leads to sustainable results.",
    },
    Tip {
        category: TipCategory::Recovery,
        text: "Foam rolling can help release muscle tension and improve mobility.",
    },
    Tip {
        category: TipCategory::Planning,
        text: "Create a dedicated workout space to minimize distractions and excuses.",
    },
    Tip {
        category: TipCategory::Nutrition,
        text: "Fitness is 20% exercise and 80% nutrition. You can't out-train a poor diet.",
    },
];

/// Tip for the given date (index = 1-based day of year modulo tip count)
pub fn daily_tip(date: NaiveDate) -> &'static Tip {
    let index = date.ordinal() as usize % TIPS.len();
    &TIPS[index]
}

/// All tips grouped by category, in list order within each group
pub fn tips_by_category() -> BTreeMap<TipCategory, Vec<&'static Tip>> {
    let mut grouped: BTreeMap<TipCategory, Vec<&'static Tip>> = BTreeMap::new();
    for tip in TIPS {
        grouped.entry(tip.category).or_default().push(tip);
    }
    grouped
}
