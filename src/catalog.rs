//! # Body catalog
//!
//! Registry of the bodies known to an [`Orrery`](crate::orrery::Orrery): each [`BodyId`] maps to
//! an immutable [`CatalogEntry`] holding the orbital element set and the descriptive
//! [`BodyMetadata`] used by presentation layers.
//!
//! A catalog is built once, either from the static table [`BodyCatalog::builtin`] or from a JSON
//! configuration file, and then shared read-only.
//!
//! ## JSON configuration
//!
//! The file holds a list of flat [`ElementRecord`]s. The populated field group selects the
//! branch:
//!
//! ```json
//! [
//!   { "name": "mars", "e": 0.0934, "i": 1.9, "omega": 286.496, "node": 49.558,
//!     "a": 1.524, "m0": 18.602, "epoch": 2451545.0, "period": 686.98 },
//!   { "name": "3I/ATLAS", "e": 6.139587, "i": 175.113, "omega": 128.010, "node": 322.157,
//!     "q": 1.356419, "tp": 2460977.981439, "closest_approach": "2025-12-19" }
//! ]
//! ```
//!
//! Records mixing both groups, or with an incomplete group, are rejected with
//! [`OrreryError::InvalidElements`].
use std::{
    collections::HashMap,
    fmt,
    fs::File,
    hash::{Hash, Hasher},
    io::{BufReader, Read},
    path::Path,
    str::FromStr,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{AstronomicalUnit, Days, Degree, JulianDay, J2000_JD},
    orbit_type::{
        cometary_element::CometaryElements, keplerian_element::KeplerianElements,
        OrbitalElementSet, OrbitalElements,
    },
    orrery_errors::OrreryError,
};

/// Identifier of a body in a [`BodyCatalog`].
///
/// The identifier keeps its original spelling for display, but comparison and hashing use the
/// lowercase form: `"Earth"`, `"earth"` and `"EARTH"` name the same body.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(String);

impl BodyId {
    pub fn new(name: impl Into<String>) -> Self {
        BodyId(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalized lookup key.
    pub fn key(&self) -> String {
        self.0.trim().to_lowercase()
    }
}

impl PartialEq for BodyId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Hash for BodyId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BodyId {
    fn from(name: &str) -> Self {
        BodyId::new(name)
    }
}

impl FromStr for BodyId {
    type Err = OrreryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(OrreryError::UnknownBody("empty body identifier".into()));
        }
        Ok(BodyId::new(s))
    }
}

/// Descriptive fields of a body, never read by the propagator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyMetadata {
    pub display_name: Option<String>,
    /// Date of closest approach to Earth, as free text (e.g. `"2025-12-19"`).
    pub closest_approach: Option<String>,
    pub notes: Option<String>,
}

/// One body of the catalog: identifier, element set and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: BodyId,
    pub elements: OrbitalElementSet,
    pub metadata: BodyMetadata,
}

impl CatalogEntry {
    pub fn new(id: impl Into<BodyId>, elements: OrbitalElementSet, metadata: BodyMetadata) -> Self {
        CatalogEntry {
            id: id.into(),
            elements,
            metadata,
        }
    }

    /// Name to show to a user: the display name if any, the identifier otherwise.
    pub fn display_name(&self) -> &str {
        self.metadata
            .display_name
            .as_deref()
            .unwrap_or(self.id.as_str())
    }
}

/// Flat, serializable form of a [`CatalogEntry`].
///
/// Angles in degrees, distances in AU, epochs in Julian Day, period in days.
/// Elliptical bodies fill `a`, `m0`, `epoch` and `period`; hyperbolic bodies fill `q` and `tp`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub name: String,
    pub e: f64,
    pub i: Degree,
    pub omega: Degree,
    pub node: Degree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<AstronomicalUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m0: Option<Degree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epoch: Option<JulianDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Days>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<AstronomicalUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tp: Option<JulianDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closest_approach: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TryFrom<ElementRecord> for CatalogEntry {
    type Error = OrreryError;

    /// Select the branch from the populated field group and validate the element set.
    fn try_from(record: ElementRecord) -> Result<Self, Self::Error> {
        let name = &record.name;
        if name.trim().is_empty() {
            return Err(OrreryError::InvalidElements(
                "catalog record without a name".into(),
            ));
        }

        let elliptic_fields = [
            ("a", record.a),
            ("m0", record.m0),
            ("epoch", record.epoch),
            ("period", record.period),
        ];
        let hyperbolic_fields = [("q", record.q), ("tp", record.tp)];

        let has_elliptic = elliptic_fields.iter().any(|(_, v)| v.is_some());
        let has_hyperbolic = hyperbolic_fields.iter().any(|(_, v)| v.is_some());

        let missing = |fields: &[(&str, Option<f64>)]| {
            fields
                .iter()
                .filter(|(_, v)| v.is_none())
                .map(|(field, _)| field.to_string())
                .collect::<Vec<_>>()
        };

        let motion = match (has_elliptic, has_hyperbolic) {
            (true, true) => {
                return Err(OrreryError::InvalidElements(format!(
                    "record '{name}' mixes elliptical and hyperbolic fields"
                )))
            }
            (false, false) => {
                return Err(OrreryError::InvalidElements(format!(
                    "record '{name}' has neither elliptical (a, m0, epoch, period) nor hyperbolic (q, tp) fields"
                )))
            }
            (true, false) => match (record.a, record.m0, record.epoch, record.period) {
                (Some(a), Some(m0), Some(epoch), Some(period)) => {
                    OrbitalElements::Keplerian(KeplerianElements {
                        semi_major_axis: a,
                        mean_anomaly_at_epoch: m0,
                        reference_epoch: epoch,
                        orbital_period: period,
                    })
                }
                _ => {
                    return Err(OrreryError::InvalidElements(format!(
                        "record '{name}' is missing elliptical field(s): {}",
                        missing(&elliptic_fields).join(", ")
                    )))
                }
            },
            (false, true) => match (record.q, record.tp) {
                (Some(q), Some(tp)) => OrbitalElements::Cometary(CometaryElements {
                    perihelion_distance: q,
                    perihelion_time: tp,
                }),
                _ => {
                    return Err(OrreryError::InvalidElements(format!(
                        "record '{name}' is missing hyperbolic field(s): {}",
                        missing(&hyperbolic_fields).join(", ")
                    )))
                }
            },
        };

        let elements = OrbitalElementSet {
            eccentricity: record.e,
            inclination: record.i,
            periapsis_argument: record.omega,
            ascending_node_longitude: record.node,
            motion,
        };
        elements
            .validate()
            .map_err(|err| OrreryError::InvalidElements(format!("record '{name}': {err}")))?;

        Ok(CatalogEntry {
            id: BodyId::new(record.name),
            elements,
            metadata: BodyMetadata {
                display_name: record.display_name,
                closest_approach: record.closest_approach,
                notes: record.notes,
            },
        })
    }
}

impl From<&CatalogEntry> for ElementRecord {
    fn from(entry: &CatalogEntry) -> Self {
        let el = &entry.elements;
        let mut record = ElementRecord {
            name: entry.id.to_string(),
            e: el.eccentricity,
            i: el.inclination,
            omega: el.periapsis_argument,
            node: el.ascending_node_longitude,
            display_name: entry.metadata.display_name.clone(),
            closest_approach: entry.metadata.closest_approach.clone(),
            notes: entry.metadata.notes.clone(),
            ..Default::default()
        };
        match &el.motion {
            OrbitalElements::Keplerian(ke) => {
                record.a = Some(ke.semi_major_axis);
                record.m0 = Some(ke.mean_anomaly_at_epoch);
                record.epoch = Some(ke.reference_epoch);
                record.period = Some(ke.orbital_period);
            }
            OrbitalElements::Cometary(ce) => {
                record.q = Some(ce.perihelion_distance);
                record.tp = Some(ce.perihelion_time);
            }
        }
        record
    }
}

/// Ordered registry of bodies, keyed by [`BodyId`].
///
/// Iteration follows insertion order. Every entry passed [`OrbitalElementSet::validate`] when it
/// was inserted.
#[derive(Debug, Clone, Default)]
pub struct BodyCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

/// (name, display name, a, e, i, ω, Ω, M₀, period) at J2000.
const PLANETS: [(&str, &str, f64, f64, f64, f64, f64, f64, f64); 8] = [
    ("mercury", "Mercury", 0.387, 0.2056, 7.0, 29.124, 48.331, 174.794, 87.97),
    ("venus", "Venus", 0.723, 0.0068, 3.4, 54.852, 76.680, 50.416, 224.70),
    ("earth", "Earth", 1.0, 0.0167, 0.0, 102.94719, 0.0, 357.529, 365.25),
    ("mars", "Mars", 1.524, 0.0934, 1.9, 286.496, 49.558, 18.602, 686.98),
    ("jupiter", "Jupiter", 5.203, 0.0484, 1.3, 273.867, 100.556, 19.804, 4332.59),
    ("saturn", "Saturn", 9.537, 0.0542, 2.5, 339.391, 113.715, 317.020, 10759.22),
    ("uranus", "Uranus", 19.191, 0.0472, 0.8, 96.734, 74.229, 142.238, 30685.4),
    ("neptune", "Neptune", 30.069, 0.0086, 1.8, 273.249, 131.721, 256.228, 60189.0),
];

impl BodyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Static table: the eight planets (elements at J2000) and the interstellar comet 3I/ATLAS.
    pub fn builtin() -> Self {
        let mut catalog = BodyCatalog::new();

        for (name, display, a, e, i, omega, node, m0, period) in PLANETS {
            let elements = OrbitalElementSet::elliptic(
                e,
                i,
                omega,
                node,
                KeplerianElements {
                    semi_major_axis: a,
                    mean_anomaly_at_epoch: m0,
                    reference_epoch: J2000_JD,
                    orbital_period: period,
                },
            );
            catalog.push_unchecked(CatalogEntry::new(
                name,
                elements,
                BodyMetadata {
                    display_name: Some(display.into()),
                    ..Default::default()
                },
            ));
        }

        let atlas = OrbitalElementSet::hyperbolic(
            6.139587,
            175.113,
            128.010,
            322.157,
            CometaryElements {
                perihelion_distance: 1.356419,
                perihelion_time: 2460977.981439,
            },
        );
        catalog.push_unchecked(CatalogEntry::new(
            "3I/ATLAS",
            atlas,
            BodyMetadata {
                display_name: Some("3I/ATLAS".into()),
                closest_approach: Some("2025-12-19".into()),
                notes: Some("interstellar comet on a hyperbolic trajectory".into()),
            },
        ));

        catalog
    }

    fn push_unchecked(&mut self, entry: CatalogEntry) {
        self.index.insert(entry.id.key(), self.entries.len());
        self.entries.push(entry);
    }

    /// Add a body to the catalog.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::DuplicateBody`] if the identifier is already present.
    /// * [`OrreryError::InvalidElements`] if the element set does not validate.
    pub fn insert(&mut self, entry: CatalogEntry) -> Result<(), OrreryError> {
        if self.index.contains_key(&entry.id.key()) {
            return Err(OrreryError::DuplicateBody(entry.id.to_string()));
        }
        entry.elements.validate()?;
        self.push_unchecked(entry);
        Ok(())
    }

    pub fn get(&self, id: &BodyId) -> Option<&CatalogEntry> {
        self.index.get(&id.key()).map(|&idx| &self.entries[idx])
    }

    /// Element set of a body, or [`OrreryError::UnknownBody`].
    pub fn elements_of(&self, id: &BodyId) -> Result<&OrbitalElementSet, OrreryError> {
        self.get(id)
            .map(|entry| &entry.elements)
            .ok_or_else(|| OrreryError::UnknownBody(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a catalog from a list of records, in order.
    pub fn from_records(
        records: impl IntoIterator<Item = ElementRecord>,
    ) -> Result<Self, OrreryError> {
        let mut catalog = BodyCatalog::new();
        for record in records {
            catalog.insert(CatalogEntry::try_from(record)?)?;
        }
        Ok(catalog)
    }

    pub fn to_records(&self) -> Vec<ElementRecord> {
        self.entries.iter().map(ElementRecord::from).collect()
    }

    /// Parse a JSON list of [`ElementRecord`]s.
    pub fn from_json_str(json: &str) -> Result<Self, OrreryError> {
        let records: Vec<ElementRecord> = serde_json::from_str(json)?;
        let catalog = Self::from_records(records)?;
        debug!("loaded {} bodies from JSON catalog", catalog.len());
        Ok(catalog)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, OrreryError> {
        let records: Vec<ElementRecord> = serde_json::from_reader(reader)?;
        let catalog = Self::from_records(records)?;
        debug!("loaded {} bodies from JSON catalog", catalog.len());
        Ok(catalog)
    }

    /// Load a JSON catalog file.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: path to a JSON file holding a list of [`ElementRecord`]s.
    ///
    /// Return
    /// ----------
    /// * The catalog, or [`OrreryError::Io`], [`OrreryError::CatalogParse`] or
    ///   [`OrreryError::InvalidElements`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OrreryError> {
        let path = path.as_ref();
        debug!("reading body catalog from {}", path.display());
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    pub fn to_json_string(&self) -> Result<String, OrreryError> {
        Ok(serde_json::to_string_pretty(&self.to_records())?)
    }
}

impl<'a> IntoIterator for &'a BodyCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;
    use crate::orbit_type::orbit_type_test::earth;

    fn mars_record() -> ElementRecord {
        ElementRecord {
            name: "mars".into(),
            e: 0.0934,
            i: 1.9,
            omega: 286.496,
            node: 49.558,
            a: Some(1.524),
            m0: Some(18.602),
            epoch: Some(2451545.0),
            period: Some(686.98),
            ..Default::default()
        }
    }

    #[test]
    fn test_body_id_is_case_insensitive() {
        assert_eq!(BodyId::from("Earth"), BodyId::from("earth"));
        assert_eq!(BodyId::from("3i/atlas").key(), "3i/atlas");
        assert_eq!(BodyId::from("  Mars ").key(), "mars");
        assert_eq!("Venus".parse::<BodyId>().unwrap().to_string(), "Venus");
        assert!("  ".parse::<BodyId>().is_err());
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = BodyCatalog::builtin();
        assert_eq!(catalog.len(), 9);
        assert!(!catalog.is_empty());

        let names: Vec<_> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(names[0], "mercury");
        assert_eq!(names[8], "3I/ATLAS");

        for entry in &catalog {
            assert!(entry.elements.validate().is_ok(), "{}", entry.id);
        }

        let atlas = catalog.get(&"3i/atlas".into()).unwrap();
        assert!(atlas.elements.is_hyperbolic());
        assert_eq!(
            atlas.metadata.closest_approach.as_deref(),
            Some("2025-12-19")
        );
        assert_eq!(catalog.get(&"EARTH".into()).unwrap().display_name(), "Earth");
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut catalog = BodyCatalog::new();
        catalog
            .insert(CatalogEntry::new("Earth", earth(), BodyMetadata::default()))
            .unwrap();

        assert_eq!(
            catalog.insert(CatalogEntry::new("earth", earth(), BodyMetadata::default())),
            Err(OrreryError::DuplicateBody("earth".into()))
        );

        let broken = OrbitalElementSet {
            eccentricity: 1.5,
            ..earth()
        };
        assert!(matches!(
            catalog.insert(CatalogEntry::new("broken", broken, BodyMetadata::default())),
            Err(OrreryError::InvalidElements(_))
        ));

        assert_eq!(catalog.elements_of(&"earth".into()), Ok(&earth()));
        assert_eq!(
            catalog.elements_of(&"pluto".into()),
            Err(OrreryError::UnknownBody("pluto".into()))
        );
        assert_eq!(catalog.get(&"Earth".into()).unwrap().display_name(), "Earth");
    }

    #[test]
    fn test_record_selects_branch() {
        let entry = CatalogEntry::try_from(mars_record()).unwrap();
        let ke = entry.elements.motion.as_keplerian().unwrap();
        assert_eq!(ke.semi_major_axis, 1.524);
        assert_eq!(ke.orbital_period, 686.98);

        let comet = ElementRecord {
            name: "c".into(),
            e: 1.2,
            q: Some(0.8),
            tp: Some(2460000.5),
            notes: Some("test".into()),
            ..Default::default()
        };
        let entry = CatalogEntry::try_from(comet).unwrap();
        assert!(entry.elements.is_hyperbolic());
        assert_eq!(entry.metadata.notes.as_deref(), Some("test"));
    }

    #[test]
    fn test_record_rejects_mixed_or_incomplete_groups() {
        let mixed = ElementRecord {
            q: Some(1.0),
            ..mars_record()
        };
        assert_eq!(
            CatalogEntry::try_from(mixed),
            Err(OrreryError::InvalidElements(
                "record 'mars' mixes elliptical and hyperbolic fields".into()
            ))
        );

        let incomplete = ElementRecord {
            m0: None,
            period: None,
            ..mars_record()
        };
        assert_eq!(
            CatalogEntry::try_from(incomplete),
            Err(OrreryError::InvalidElements(
                "record 'mars' is missing elliptical field(s): m0, period".into()
            ))
        );

        let empty = ElementRecord {
            name: "x".into(),
            e: 0.1,
            ..Default::default()
        };
        assert!(CatalogEntry::try_from(empty).is_err());

        let wrong_branch = ElementRecord {
            name: "y".into(),
            e: 0.5,
            q: Some(1.0),
            tp: Some(2460000.5),
            ..Default::default()
        };
        assert!(matches!(
            CatalogEntry::try_from(wrong_branch),
            Err(OrreryError::InvalidElements(_))
        ));
    }

    #[test]
    fn test_json_catalog() {
        let json = r#"[
            { "name": "mars", "e": 0.0934, "i": 1.9, "omega": 286.496, "node": 49.558,
              "a": 1.524, "m0": 18.602, "epoch": 2451545.0, "period": 686.98 },
            { "name": "3I/ATLAS", "e": 6.139587, "i": 175.113, "omega": 128.010,
              "node": 322.157, "q": 1.356419, "tp": 2460977.981439,
              "closest_approach": "2025-12-19" }
        ]"#;
        let catalog = BodyCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(&"mars".into()).unwrap(),
            &CatalogEntry::try_from(mars_record()).unwrap()
        );

        let reloaded = BodyCatalog::from_json_str(&catalog.to_json_string().unwrap()).unwrap();
        assert_eq!(reloaded.to_records(), catalog.to_records());

        assert!(matches!(
            BodyCatalog::from_json_str("{ not json"),
            Err(OrreryError::CatalogParse(_))
        ));
        assert!(matches!(
            BodyCatalog::from_json_file("does/not/exist.json"),
            Err(OrreryError::Io(_))
        ));
    }
}
