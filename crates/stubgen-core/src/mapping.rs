//! Type-Mapping Table
//!
//! Static lookup from the informal names used in documentation comments to
//! canonical, fully-qualified type paths.

use std::collections::BTreeMap;

/// Built-in mapping entries
const BUILTIN_TYPES: &[(&str, &str)] = &[
    // anise.time
    ("Epoch", "anise.time.Epoch"),
    ("Duration", "anise.time.Duration"),
    ("TimeSeries", "anise.time.TimeSeries"),
    ("TimeScale", "anise.time.TimeScale"),
    ("Unit", "anise.time.Unit"),
    ("MonthName", "anise.time.MonthName"),
    ("Weekday", "anise.time.Weekday"),
    // anise.astro
    ("Frame", "anise.astro.Frame"),
    ("Orbit", "anise.astro.Orbit"),
    ("Location", "anise.astro.Location"),
    ("AzElRange", "anise.astro.AzElRange"),
    ("Occultation", "anise.astro.Occultation"),
    ("Ellipsoid", "anise.astro.Ellipsoid"),
    ("Ephemeris", "anise.astro.Ephemeris"),
    ("EphemerisRecord", "anise.astro.EphemerisRecord"),
    ("Mass", "anise.astro.Mass"),
    ("DragData", "anise.astro.DragData"),
    ("SRPData", "anise.astro.SRPData"),
    ("DafDataType", "anise.astro.DafDataType"),
    ("LocalFrame", "anise.astro.LocalFrame"),
    ("Covariance", "anise.astro.Covariance"),
    ("TerrainMask", "anise.astro.TerrainMask"),
    ("FrameUid", "anise.astro.FrameUid"),
    // anise
    ("Aberration", "anise.Aberration"),
    ("Almanac", "anise.Almanac"),
    ("MetaAlmanac", "anise.MetaAlmanac"),
    ("MetaFile", "anise.MetaFile"),
    ("LocationDataSet", "anise.LocationDataSet"),
    ("LocationDhallSet", "anise.LocationDhallSet"),
    ("LocationDhallSetEntry", "anise.LocationDhallSetEntry"),
    ("PyLocationDataSet", "anise.LocationDataSet"),
    ("PyReportScalars", "anise.analysis.ReportScalars"),
    ("ReportScalars", "anise.analysis.ReportScalars"),
    // anise.rotation
    ("Quaternion", "anise.rotation.Quaternion"),
    ("DCM", "anise.rotation.DCM"),
    // anise.analysis
    ("Condition", "anise.analysis.Condition"),
    ("Event", "anise.analysis.Event"),
    ("EventDetails", "anise.analysis.EventDetails"),
    ("EventEdge", "anise.analysis.EventEdge"),
    ("OrbitalElement", "anise.analysis.OrbitalElement"),
    ("Plane", "anise.analysis.Plane"),
    ("VisibilityArc", "anise.analysis.VisibilityArc"),
    ("StateSpec", "anise.analysis.StateSpec"),
    ("PyStateSpec", "anise.analysis.StateSpec"),
    ("EventArc", "anise.analysis.EventArc"),
    ("PyEventArc", "anise.analysis.EventArc"),
    ("FrameSpec", "anise.analysis.FrameSpec"),
    ("PyFrameSpec", "anise.analysis.FrameSpec"),
    ("OrthogonalFrame", "anise.analysis.OrthogonalFrame"),
    ("PyOrthogonalFrame", "anise.analysis.OrthogonalFrame"),
    ("ScalarExpr", "anise.analysis.ScalarExpr"),
    ("PyScalarExpr", "anise.analysis.ScalarExpr"),
    ("VectorExpr", "anise.analysis.VectorExpr"),
    ("PyVectorExpr", "anise.analysis.VectorExpr"),
    // anise.instrument
    ("Instrument", "anise.instrument.Instrument"),
    ("FovShape", "anise.instrument.FovShape"),
    // third-party
    ("numpy.array", "numpy.ndarray"),
    ("numpy.ndarray", "numpy.ndarray"),
    ("np.ndarray", "numpy.ndarray"),
    ("np.array", "numpy.ndarray"),
    ("tuples", "typing.Tuple"),
];

/// Mapping from informal type names to canonical dotted paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMappingTable {
    entries: BTreeMap<String, String>,
}

impl TypeMappingTable {
    /// A table with no entries
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the generator
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        table.extend(
            BUILTIN_TYPES
                .iter()
                .map(|(name, path)| ((*name).to_string(), (*path).to_string())),
        );
        table
    }

    /// Add or override entries
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.entries.extend(entries);
    }

    /// Look up the canonical path for an informal name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterate over entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
