/// Humidity tier. Used both for a plant's preference and for classifying
/// simulated humidity into thirds of the configured band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityLevel {
    Low,
    Medium,
    High,
}

impl HumidityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityLevel::Low => "low",
            HumidityLevel::Medium => "medium",
            HumidityLevel::High => "high",
        }
    }

    /// Accepts English and Spanish catalog spellings, case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baja" | "bajo" => Some(HumidityLevel::Low),
            "medium" | "media" | "medio" => Some(HumidityLevel::Medium),
            "high" | "alta" | "alto" => Some(HumidityLevel::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for HumidityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SunTolerance {
    High,
    #[default]
    Other,
}

impl SunTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            SunTolerance::High => "high",
            SunTolerance::Other => "other",
        }
    }

    /// Anything that is not a recognised "high" value counts as `Other`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" | "alto" | "alta" => SunTolerance::High,
            _ => SunTolerance::Other,
        }
    }
}

impl std::fmt::Display for SunTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantProfile {
    pub name: String,
    /// `None` when the catalog value was not recognised; such a plant never
    /// gets the "adequate" text.
    pub humidity_preference: Option<HumidityLevel>,
    pub sun_tolerance: SunTolerance,
}

impl PlantProfile {
    pub fn new(
        name: impl Into<String>,
        humidity_preference: Option<HumidityLevel>,
        sun_tolerance: SunTolerance,
    ) -> Self {
        Self {
            name: name.into(),
            humidity_preference,
            sun_tolerance,
        }
    }
}

/// Plant profiles keyed by name, in catalog order.
///
/// Re-inserting an existing name replaces its values but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct PlantCatalog {
    plants: Vec<PlantProfile>,
}

impl PlantCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: PlantProfile) {
        match self.plants.iter_mut().find(|p| p.name == profile.name) {
            Some(existing) => *existing = profile,
            None => self.plants.push(profile),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlantProfile> {
        self.plants.iter()
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

impl FromIterator<PlantProfile> for PlantCatalog {
    fn from_iter<I: IntoIterator<Item = PlantProfile>>(iter: I) -> Self {
        let mut catalog = PlantCatalog::new();
        for profile in iter {
            catalog.insert(profile);
        }
        catalog
    }
}

#[cfg(test)]
impl PlantCatalog {
    pub fn get(&self, name: &str) -> Option<&PlantProfile> {
        self.plants.iter().find(|p| p.name == name)
    }
}
