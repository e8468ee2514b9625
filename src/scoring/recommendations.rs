use serde::Serialize;

/// A tip shown for the categories that dominate the footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Categories that trigger this tip
    pub triggers: &'static [&'static str],
    pub text: &'static str,
}

pub const USE_PUBLIC_TRANSPORT: Recommendation = Recommendation {
    triggers: &["Transport"],
    text: "Use public transport or carpool to reduce travel emissions.",
};

pub const EFFICIENT_APPLIANCES: Recommendation = Recommendation {
    triggers: &["Electricity"],
    text: "Switch to LED bulbs and energy-efficient appliances.",
};

pub const SAVE_WATER: Recommendation = Recommendation {
    triggers: &["Water"],
    text: "Take shorter showers and fix leaks immediately.",
};

pub const COOK_EFFICIENTLY: Recommendation = Recommendation {
    triggers: &["LPG"],
    text: "Optimize cooking times and use pressure cookers.",
};

pub const COOL_WISELY: Recommendation = Recommendation {
    triggers: &["AC/Fan"],
    text: "Set AC to 24-26\u{b0}C and use fans when possible.",
};

pub const AVOID_PLASTIC: Recommendation = Recommendation {
    triggers: &["Plastic", "Packaged Food"],
    text: "Avoid single-use plastics and opt for reusable containers.",
};

pub const UNPLUG_DEVICES: Recommendation = Recommendation {
    triggers: &["Devices"],
    text: "Unplug devices when not in use to save energy.",
};

/// Shown when neither travel nor electricity is among the top contributors
pub const PLANT_TREES: Recommendation = Recommendation {
    triggers: &[],
    text: "Plant trees and support reforestation projects.",
};

/// Every tip, in display order. The exported report lists all of them.
pub const ALL_RECOMMENDATIONS: [Recommendation; 8] = [
    USE_PUBLIC_TRANSPORT,
    EFFICIENT_APPLIANCES,
    SAVE_WATER,
    COOK_EFFICIENTLY,
    COOL_WISELY,
    AVOID_PLASTIC,
    UNPLUG_DEVICES,
    PLANT_TREES,
];

/// Pick the tips that apply to a set of top contributor labels.
pub fn recommend(top: &[&str]) -> Vec<Recommendation> {
    let has = |label: &str| top.iter().any(|t| *t == label);

    let mut tips: Vec<Recommendation> = ALL_RECOMMENDATIONS
        .iter()
        .filter(|r| r.triggers.iter().any(|&t| has(t)))
        .copied()
        .collect();

    if !has("Transport") && !has("Electricity") {
        tips.push(PLANT_TREES);
    }

    tips
}
