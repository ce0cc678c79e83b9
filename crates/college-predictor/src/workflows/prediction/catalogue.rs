use std::io::Read;
use std::path::Path;

use super::domain::{
    ApplicantProfile, CollegeOffering, GenderPool, InstitutionPreference, InstitutionType,
};

/// A fallback recommendation is never offered beyond this multiple of the cutoff.
pub const RANK_CLIFF_MULTIPLIER: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalogue CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("duplicate offering id in catalogue: {0}")]
    DuplicateId(String),
}

/// Static set of offerings used when the remote service has nothing to offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    offerings: Vec<CollegeOffering>,
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalogue {
    pub fn new(offerings: Vec<CollegeOffering>) -> Result<Self, CatalogueError> {
        let mut seen = std::collections::HashSet::new();
        for offering in &offerings {
            if !seen.insert(offering.id.as_str()) {
                return Err(CatalogueError::DuplicateId(offering.id.clone()));
            }
        }
        Ok(Self { offerings })
    }

    /// Reads offerings from CSV with the header
    /// `id,institute,program,institution_type,state,region,seat_type,gender,opening_rank,closing_rank,year,round`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogueError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let offerings = csv_reader
            .deserialize::<CollegeOffering>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(offerings)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn offerings(&self) -> &[CollegeOffering] {
        &self.offerings
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&CollegeOffering> {
        self.offerings.iter().find(|offering| offering.id == id)
    }

    /// Offerings the local generator may recommend for the profile, in
    /// catalogue order.
    pub fn candidates<'a>(
        &'a self,
        profile: &'a ApplicantProfile,
    ) -> impl Iterator<Item = &'a CollegeOffering> + 'a {
        self.offerings
            .iter()
            .filter(move |offering| offering_matches(profile, offering))
    }

    pub fn builtin() -> Self {
        Self {
            offerings: builtin_offerings(),
        }
    }
}

fn same_text(wanted: Option<&str>, actual: &str) -> bool {
    match wanted.map(str::trim).filter(|value| !value.is_empty()) {
        None => true,
        Some(value) => value.to_lowercase() == actual.trim().to_lowercase(),
    }
}

fn gender_matches(wanted: GenderPool, label: &str) -> bool {
    label == GenderPool::NEUTRAL_LABEL
        || label == wanted.label()
        || (label.contains("Female") && wanted == GenderPool::FemaleOnly)
}

/// Fallback eligibility filter. All conditions must hold.
pub fn offering_matches(profile: &ApplicantProfile, offering: &CollegeOffering) -> bool {
    if !offering.is_rankable() {
        return false;
    }
    if u64::from(profile.rank) > u64::from(offering.closing_rank) * RANK_CLIFF_MULTIPLIER {
        return false;
    }
    if offering.year != profile.year || offering.round != profile.round {
        return false;
    }
    if !same_text(profile.state.as_deref(), &offering.state)
        || !same_text(profile.region.as_deref(), &offering.region)
    {
        return false;
    }
    if let InstitutionPreference::Only(kind) = profile.institution_type {
        if kind != offering.institution_type {
            return false;
        }
    }
    if !offering
        .seat_type
        .to_uppercase()
        .contains(profile.category.label())
    {
        return false;
    }
    gender_matches(profile.gender, &offering.gender)
}

#[allow(clippy::too_many_arguments)]
fn offering(
    id: &str,
    institute: &str,
    program: &str,
    institution_type: InstitutionType,
    state: &str,
    region: &str,
    seat_type: &str,
    gender: &str,
    ranks: (u32, u32),
    year: u16,
    round: u8,
) -> CollegeOffering {
    CollegeOffering {
        id: id.to_string(),
        institute: institute.to_string(),
        program: program.to_string(),
        institution_type,
        state: state.to_string(),
        region: region.to_string(),
        seat_type: seat_type.to_string(),
        gender: gender.to_string(),
        opening_rank: ranks.0,
        closing_rank: ranks.1,
        year,
        round,
    }
}

fn builtin_offerings() -> Vec<CollegeOffering> {
    use InstitutionType::{Iiit, Iit, Nit, Other};
    const NEUTRAL: &str = GenderPool::NEUTRAL_LABEL;
    const FEMALE: &str = GenderPool::FEMALE_ONLY_LABEL;

    vec![
        offering(
            "nit-kurukshetra-computer",
            "National Institute of Technology, Kurukshetra",
            "Computer Engineering (4 Years, Bachelor of Technology)",
            Nit,
            "Haryana",
            "North",
            "OPEN",
            NEUTRAL,
            (717, 1118),
            2022,
            1,
        ),
        offering(
            "iit-delhi-cse",
            "Indian Institute of Technology, Delhi",
            "Computer Science & Engineering",
            Iit,
            "Delhi",
            "North",
            "OPEN",
            NEUTRAL,
            (1, 10),
            2022,
            1,
        ),
        offering(
            "nit-suratkal-cse",
            "National Institute of Technology, Surathkal",
            "Computer Science & Engineering",
            Nit,
            "Karnataka",
            "South",
            "OPEN",
            NEUTRAL,
            (100, 500),
            2022,
            1,
        ),
        offering(
            "nit-trichy-ece",
            "National Institute of Technology, Tiruchirappalli",
            "Electronics and Communication Engineering",
            Nit,
            "Tamil Nadu",
            "South",
            "OPEN",
            NEUTRAL,
            (1200, 2650),
            2022,
            1,
        ),
        offering(
            "nit-trichy-ece-female",
            "National Institute of Technology, Tiruchirappalli",
            "Electronics and Communication Engineering",
            Nit,
            "Tamil Nadu",
            "South",
            "OPEN",
            FEMALE,
            (2100, 4480),
            2022,
            1,
        ),
        offering(
            "nit-warangal-mech",
            "National Institute of Technology, Warangal",
            "Mechanical Engineering",
            Nit,
            "Telangana",
            "South",
            "OPEN",
            NEUTRAL,
            (4300, 7900),
            2022,
            1,
        ),
        offering(
            "nit-rourkela-civil-obc",
            "National Institute of Technology, Rourkela",
            "Civil Engineering",
            Nit,
            "Odisha",
            "East",
            "OBC-NCL",
            NEUTRAL,
            (6800, 9400),
            2022,
            1,
        ),
        offering(
            "nit-durgapur-ee",
            "National Institute of Technology, Durgapur",
            "Electrical Engineering",
            Nit,
            "West Bengal",
            "East",
            "OPEN",
            NEUTRAL,
            (9100, 14250),
            2022,
            1,
        ),
        offering(
            "nit-silchar-cse-sc",
            "National Institute of Technology, Silchar",
            "Computer Science and Engineering",
            Nit,
            "Assam",
            "North-East",
            "SC",
            NEUTRAL,
            (1400, 2300),
            2022,
            1,
        ),
        offering(
            "nit-agartala-ece-st",
            "National Institute of Technology, Agartala",
            "Electronics and Communication Engineering",
            Nit,
            "Tripura",
            "North-East",
            "ST",
            NEUTRAL,
            (900, 2100),
            2022,
            1,
        ),
        offering(
            "manit-bhopal-cse",
            "Maulana Azad National Institute of Technology, Bhopal",
            "Computer Science and Engineering",
            Nit,
            "Madhya Pradesh",
            "Central",
            "OPEN",
            NEUTRAL,
            (3500, 5600),
            2022,
            1,
        ),
        offering(
            "svnit-surat-chem-ews",
            "Sardar Vallabhbhai National Institute of Technology, Surat",
            "Chemical Engineering",
            Nit,
            "Gujarat",
            "West",
            "EWS",
            NEUTRAL,
            (5200, 7100),
            2022,
            1,
        ),
        offering(
            "vnit-nagpur-ece",
            "Visvesvaraya National Institute of Technology, Nagpur",
            "Electronics and Communication Engineering",
            Nit,
            "Maharashtra",
            "West",
            "OPEN",
            NEUTRAL,
            (4100, 6300),
            2022,
            1,
        ),
        offering(
            "iiit-hyderabad-cse",
            "International Institute of Information Technology, Hyderabad",
            "Computer Science and Engineering",
            Iiit,
            "Telangana",
            "South",
            "OPEN",
            NEUTRAL,
            (150, 820),
            2022,
            1,
        ),
        offering(
            "iiit-allahabad-it",
            "Indian Institute of Information Technology, Allahabad",
            "Information Technology",
            Iiit,
            "Uttar Pradesh",
            "North",
            "OPEN",
            NEUTRAL,
            (2900, 5100),
            2022,
            1,
        ),
        offering(
            "iiit-gwalior-it-female",
            "Atal Bihari Vajpayee Indian Institute of Information Technology, Gwalior",
            "Information Technology",
            Iiit,
            "Madhya Pradesh",
            "Central",
            "OPEN",
            FEMALE,
            (7200, 11800),
            2022,
            1,
        ),
        offering(
            "iit-bombay-ee",
            "Indian Institute of Technology, Bombay",
            "Electrical Engineering",
            Iit,
            "Maharashtra",
            "West",
            "OPEN",
            NEUTRAL,
            (180, 480),
            2022,
            1,
        ),
        offering(
            "iit-guwahati-mech",
            "Indian Institute of Technology, Guwahati",
            "Mechanical Engineering",
            Iit,
            "Assam",
            "North-East",
            "OPEN",
            NEUTRAL,
            (3300, 5200),
            2022,
            1,
        ),
        offering(
            "iit-kharagpur-civil-obc",
            "Indian Institute of Technology, Kharagpur",
            "Civil Engineering",
            Iit,
            "West Bengal",
            "East",
            "OBC-NCL",
            NEUTRAL,
            (2400, 3600),
            2022,
            1,
        ),
        offering(
            "pec-chandigarh-cse",
            "Punjab Engineering College, Chandigarh",
            "Computer Science and Engineering",
            Other,
            "Chandigarh",
            "North",
            "OPEN",
            NEUTRAL,
            (6100, 12400),
            2022,
            1,
        ),
        offering(
            "nit-kurukshetra-computer-2023",
            "National Institute of Technology, Kurukshetra",
            "Computer Engineering (4 Years, Bachelor of Technology)",
            Nit,
            "Haryana",
            "North",
            "OPEN",
            NEUTRAL,
            (702, 1210),
            2023,
            1,
        ),
        offering(
            "nit-calicut-cse-2023",
            "National Institute of Technology, Calicut",
            "Computer Science and Engineering",
            Nit,
            "Kerala",
            "South",
            "OPEN",
            NEUTRAL,
            (1500, 2900),
            2023,
            1,
        ),
        offering(
            "nit-jaipur-ece-round2",
            "Malaviya National Institute of Technology, Jaipur",
            "Electronics and Communication Engineering",
            Nit,
            "Rajasthan",
            "North",
            "OPEN",
            NEUTRAL,
            (3900, 6600),
            2022,
            2,
        ),
    ]
}
