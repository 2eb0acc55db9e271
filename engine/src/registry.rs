//! The two registries: which models count as business jets, and which
//! registered airframes fly one of them.
//!
//! Both are plain immutable-after-build value objects, rebuilt wholesale from
//! the reference tables on explicit refresh.  No module-level state.
//!

use std::collections::btree_map::{Iter, Keys};
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use jetwatch_formats::{RegisteredAircraft, TypeDesignator};

/// Manufacturers whose landplane jets we keep wholesale.
const JET_MAKERS: [&str; 4] = ["BOMBARDIER", "GULFSTREAM", "DASSAULT", "PIAGGIO"];

/// Military models slipping through the DASSAULT entry.
const MILITARY: [&str; 2] = ["Rafale", "Mirage"];

/// One business-jet model out of the type designator table.
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AircraftModel {
    /// Manufacturer code (e.g. "GULFSTREAM")
    pub manufacturer: String,
    /// Model name (e.g. "G-VI Gulfstream G650")
    pub name: String,
    /// ICAO type designator (e.g. "GLF6"), the join key
    pub designator: String,
}

impl AircraftModel {
    /// Human-facing label, manufacturer then model name.
    ///
    pub fn label(&self) -> String {
        format!("{} {}", self.manufacturer, self.name)
    }
}

/// All retained models, keyed by type designator.
///
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, AircraftModel>,
}

impl From<Vec<AircraftModel>> for ModelRegistry {
    fn from(value: Vec<AircraftModel>) -> Self {
        let models = value
            .into_iter()
            .map(|m| (m.designator.clone(), m))
            .collect();
        ModelRegistry { models }
    }
}

impl ModelRegistry {
    /// Filter the type designator table down to the business-jet models.
    ///
    /// A row is retained when it is a landplane jet from one of the known
    /// business-jet manufacturers, or any CESSNA whose model name carries
    /// "Citation" (the Citation line is not category-clean in the table).
    /// Military DASSAULT models are dropped afterwards.  On duplicate
    /// designators the last row wins, the table is loaded in definition order.
    ///
    #[tracing::instrument(skip(rows))]
    pub fn build(rows: &[TypeDesignator]) -> Self {
        let models = rows
            .iter()
            .filter(|r| Self::retained(r))
            .map(|r| {
                (
                    r.designator.clone(),
                    AircraftModel {
                        manufacturer: r.manufacturer.clone(),
                        name: r.model.clone(),
                        designator: r.designator.clone(),
                    },
                )
            })
            .collect::<BTreeMap<_, _>>();

        trace!("{} models retained", models.len());
        ModelRegistry { models }
    }

    fn retained(row: &TypeDesignator) -> bool {
        let jet = row.category == "LandPlane"
            && row.engine_type == "Jet"
            && JET_MAKERS.contains(&row.manufacturer.as_str());
        let citation = row.manufacturer == "CESSNA" && row.model.contains("Citation");

        (jet || citation) && !MILITARY.iter().any(|m| row.model.contains(m))
    }

    #[inline]
    pub fn get(&self, designator: &str) -> Option<&AircraftModel> {
        self.models.get(designator)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, AircraftModel> {
        self.models.iter()
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, String, AircraftModel> {
        self.models.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// All retained models into a nicely formatted string.
    ///
    pub fn list(&self) -> String {
        let header = vec!["Designator", "Manufacturer", "Model"];

        let mut builder = Builder::default();
        builder.push_record(header);

        self.models.values().for_each(|m| {
            builder.push_record(vec![&m.designator, &m.manufacturer, &m.name]);
        });

        let allf = builder.build().with(Style::modern()).to_string();
        format!("{} jet models:\n{allf}", self.len())
    }
}

/// One tracked airframe out of the registered aircraft table.
///
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Jet {
    /// Lowercase hex transponder address
    pub icao24: String,
    /// Tail number
    pub registration: String,
    /// Country of registration
    pub country: String,
    /// Resolved model label (manufacturer + model name)
    pub model: String,
}

/// All tracked airframes, keyed by lowercase icao24.
///
#[derive(Clone, Debug, Default)]
pub struct JetRegistry {
    jets: BTreeMap<String, Jet>,
}

impl JetRegistry {
    /// Join the registered aircraft table against the model registry.
    ///
    /// Rows whose type code resolves to no retained model are silently
    /// dropped, that is the common case.  Identifiers are normalised to
    /// lowercase, duplicates: last row wins.
    ///
    #[tracing::instrument(skip(rows, models))]
    pub fn build(rows: &[RegisteredAircraft], models: &ModelRegistry) -> Self {
        let jets = rows
            .iter()
            .filter_map(|r| {
                models.get(&r.typecode).map(|m| {
                    let icao24 = r.icao24.to_lowercase();
                    (
                        icao24.clone(),
                        Jet {
                            icao24,
                            registration: r.registration.clone(),
                            country: r.country.clone(),
                            model: m.label(),
                        },
                    )
                })
            })
            .collect::<BTreeMap<_, _>>();

        trace!("{} jets registered", jets.len());
        JetRegistry { jets }
    }

    #[inline]
    pub fn get(&self, icao24: &str) -> Option<&Jet> {
        self.jets.get(&icao24.to_lowercase())
    }

    #[inline]
    pub fn contains(&self, icao24: &str) -> bool {
        self.jets.contains_key(&icao24.to_lowercase())
    }

    /// Intersection of known identifiers with the supplied set.  Never
    /// mutates the registry.
    ///
    pub fn select(&self, ids: &BTreeSet<String>) -> BTreeSet<String> {
        self.jets
            .keys()
            .filter(|icao| ids.contains(*icao))
            .cloned()
            .collect()
    }

    /// Keep only the entries whose identifier is in `ids`.  In place and
    /// non-reversible, rebuild to recover the full registry.
    ///
    pub fn restrict(&mut self, ids: &BTreeSet<String>) {
        self.jets.retain(|icao, _| ids.contains(icao));
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, Jet> {
        self.jets.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.jets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jets.is_empty()
    }

    /// All tracked airframes into a nicely formatted string.
    ///
    pub fn list(&self) -> String {
        let header = vec!["ICAO24", "Registration", "Country", "Model"];

        let mut builder = Builder::default();
        builder.push_record(header);

        self.jets.values().for_each(|j| {
            builder.push_record(vec![&j.icao24, &j.registration, &j.country, &j.model]);
        });

        let allf = builder.build().with(Style::modern()).to_string();
        format!("{} registered jets:\n{allf}", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(category: &str, engine: &str, maker: &str, model: &str, designator: &str) -> TypeDesignator {
        TypeDesignator {
            category: category.to_string(),
            description: "L2J".to_string(),
            designator: designator.to_string(),
            engine_count: "2".to_string(),
            engine_type: engine.to_string(),
            manufacturer: maker.to_string(),
            model: model.to_string(),
            wtc: "M".to_string(),
        }
    }

    fn reg(icao24: &str, registration: &str, country: &str, typecode: &str) -> RegisteredAircraft {
        RegisteredAircraft {
            icao24: icao24.to_string(),
            registration: registration.to_string(),
            country: country.to_string(),
            typecode: typecode.to_string(),
        }
    }

    #[rstest]
    #[case(row("LandPlane", "Jet", "GULFSTREAM", "G-VI Gulfstream G650", "GLF6"), true)]
    #[case(row("LandPlane", "Jet", "BOMBARDIER", "Global 7500", "GL7T"), true)]
    #[case(row("LandPlane", "Jet", "PIAGGIO", "P-180 Avanti", "P180"), true)]
    #[case(row("Helicopter", "Jet", "GULFSTREAM", "Whatever", "XXX1"), false)]
    #[case(row("LandPlane", "Turboprop", "GULFSTREAM", "G-I Gulfstream I", "G159"), false)]
    #[case(row("LandPlane", "Jet", "BOEING", "737-800", "B738"), false)]
    #[case(row("LandPlane", "Jet", "DASSAULT", "Falcon 900", "F900"), true)]
    #[case(row("LandPlane", "Jet", "DASSAULT", "Rafale B", "RFAL"), false)]
    #[case(row("LandPlane", "Jet", "DASSAULT", "Mirage 2000", "MIR2"), false)]
    #[case(row("Amphibian", "Piston", "CESSNA", "Citation Mustang", "C510"), true)]
    #[case(row("LandPlane", "Jet", "CESSNA", "172 Skyhawk", "C172"), false)]
    fn test_model_filter(#[case] row: TypeDesignator, #[case] kept: bool) {
        let registry = ModelRegistry::build(&[row]);
        assert_eq!(kept, !registry.is_empty());
    }

    #[test]
    fn test_model_registry_build() {
        let rows = vec![
            row("LandPlane", "Jet", "GULFSTREAM", "G-VI Gulfstream G650", "GLF6"),
            row("LandPlane", "Jet", "BOEING", "737-800", "B738"),
            row("LandPlane", "Jet", "DASSAULT", "Rafale B", "RFAL"),
        ];
        let registry = ModelRegistry::build(&rows);

        assert_eq!(1, registry.len());
        let m = registry.get("GLF6").unwrap();
        assert_eq!("GULFSTREAM G-VI Gulfstream G650", m.label());
    }

    #[test]
    fn test_model_registry_duplicate_last_wins() {
        let rows = vec![
            row("LandPlane", "Jet", "GULFSTREAM", "First entry", "GLF6"),
            row("LandPlane", "Jet", "GULFSTREAM", "Second entry", "GLF6"),
        ];
        let registry = ModelRegistry::build(&rows);

        assert_eq!(1, registry.len());
        assert_eq!("Second entry", registry.get("GLF6").unwrap().name);
    }

    #[test]
    fn test_jet_registry_join() {
        let models = ModelRegistry::build(&[row(
            "LandPlane",
            "Jet",
            "GULFSTREAM",
            "G-VI Gulfstream G650",
            "GLF6",
        )]);
        let rows = vec![
            reg("4B1804", "HB-JSG", "Switzerland", "GLF6"),
            reg("39856a", "F-HGYM", "France", "C68A"),
        ];
        let jets = JetRegistry::build(&rows, &models);

        assert_eq!(1, jets.len());

        // normalised to lowercase
        let jet = jets.get("4b1804").unwrap();
        assert_eq!("HB-JSG", jet.registration);
        assert_eq!("GULFSTREAM G-VI Gulfstream G650", jet.model);

        // case-insensitive lookup
        assert!(jets.contains("4B1804"));
        assert!(!jets.contains("39856a"));
    }

    #[test]
    fn test_jet_registry_select_is_idempotent() {
        let models = ModelRegistry::from(vec![AircraftModel {
            manufacturer: "ACME".to_string(),
            name: "JetX".to_string(),
            designator: "M1".to_string(),
        }]);
        let rows = vec![
            reg("abc123", "N1", "FR", "M1"),
            reg("def456", "N2", "DE", "M1"),
        ];
        let jets = JetRegistry::build(&rows, &models);

        let wanted: BTreeSet<String> = ["abc123".to_string(), "zzz999".to_string()].into();
        let first = jets.select(&wanted);
        let second = jets.select(&wanted);

        assert_eq!(first, second);
        assert_eq!(1, first.len());
        assert!(first.contains("abc123"));
        assert_eq!(2, jets.len());
    }

    #[test]
    fn test_jet_registry_restrict() {
        let models = ModelRegistry::from(vec![AircraftModel {
            manufacturer: "ACME".to_string(),
            name: "JetX".to_string(),
            designator: "M1".to_string(),
        }]);
        let rows = vec![
            reg("abc123", "N1", "FR", "M1"),
            reg("def456", "N2", "DE", "M1"),
        ];
        let mut jets = JetRegistry::build(&rows, &models);

        let keep: BTreeSet<String> = ["def456".to_string()].into();
        jets.restrict(&keep);

        assert_eq!(1, jets.len());
        assert!(jets.get("abc123").is_none());
        assert!(jets.get("def456").is_some());
    }
}
