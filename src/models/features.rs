/// Feature names displayed under "About me"
const ABOUT_ME: &[&str] = &[
    "Student",
    "Professional",
    "Postgraduate",
    "Introvert",
    "Extrovert",
    "LGBTQ+ friendly",
    "Vegetarian",
    "Vegan",
    "Religious",
];

/// Feature names displayed under "Lifestyle"
const LIFESTYLE: &[&str] = &[
    "Non-smoker",
    "Smoker",
    "Early riser",
    "Night owl",
    "Tidy",
    "Pet owner",
    "Works from home",
    "Social drinker",
    "Quiet",
];

/// Feature names displayed under "Interests"
const INTERESTS: &[&str] = &[
    "Gym",
    "Cooking",
    "Gaming",
    "Music",
    "Reading",
    "Travel",
    "Hiking",
    "Films",
    "Art",
    "Sports",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureCategory {
    AboutMe,
    Lifestyle,
    Interests,
}

impl FeatureCategory {
    /// First table containing `feature` wins; unknown features are not shown.
    pub fn of(feature: &str) -> Option<Self> {
        if ABOUT_ME.contains(&feature) {
            Some(Self::AboutMe)
        } else if LIFESTYLE.contains(&feature) {
            Some(Self::Lifestyle)
        } else if INTERESTS.contains(&feature) {
            Some(Self::Interests)
        } else {
            None
        }
    }
}

/// Feature names grouped into the three profile sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureBuckets {
    pub about_me: Vec<String>,
    pub lifestyle: Vec<String>,
    pub interests: Vec<String>,
}

pub fn categorize<'a>(features: impl IntoIterator<Item = &'a str>) -> FeatureBuckets {
    let mut buckets = FeatureBuckets::default();

    for feature in features {
        let bucket = match FeatureCategory::of(feature) {
            Some(FeatureCategory::AboutMe) => &mut buckets.about_me,
            Some(FeatureCategory::Lifestyle) => &mut buckets.lifestyle,
            Some(FeatureCategory::Interests) => &mut buckets.interests,
            None => continue,
        };
        bucket.push(feature.to_string());
    }

    buckets
}
