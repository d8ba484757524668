//! Static descriptors of the scene: data sources around the hub, output
//! formats in the tray and the categories used to style output particles.
//!
//! Output formats and output particle categories are separate enumerations;
//! their partial overlap (`api`) is incidental.

/// Kind of data origin drawn around the hub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Json,
    Spreadsheet,
    Image,
    Html,
    Geospatial,
    Pdf,
}

impl SourceKind {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Spreadsheet => "spreadsheet",
            Self::Image => "image",
            Self::Html => "html",
            Self::Geospatial => "geospatial",
            Self::Pdf => "pdf",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataSource {
    pub kind: SourceKind,
    pub label: &'static str,
    pub icon: &'static str,
    /// Particle colour (CSS hex).
    pub color: &'static str,
}

pub const DEFAULT_SOURCES: [DataSource; 6] = [
    DataSource {
        kind: SourceKind::Json,
        label: "JSON Data",
        icon: "file-json",
        color: "#2563eb",
    },
    DataSource {
        kind: SourceKind::Spreadsheet,
        label: "Spreadsheet",
        icon: "file-spreadsheet",
        color: "#16a34a",
    },
    DataSource {
        kind: SourceKind::Image,
        label: "Image Data",
        icon: "file-image",
        color: "#9333ea",
    },
    DataSource {
        kind: SourceKind::Html,
        label: "HTML",
        icon: "file-code",
        color: "#ca8a04",
    },
    DataSource {
        kind: SourceKind::Geospatial,
        label: "Geospatial",
        icon: "globe-2",
        color: "#0891b2",
    },
    DataSource {
        kind: SourceKind::Pdf,
        label: "PDF Files",
        icon: "file-text",
        color: "#e11d48",
    },
];

/// Format highlighted in the output tray.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Csv,
    Json,
    Api,
    Database,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [Self::Csv, Self::Json, Self::Api, Self::Database];

    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Json => "JSON",
            Self::Api => "API",
            Self::Database => "Database",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Csv => "table-2",
            Self::Json => "file-json",
            Self::Api => "file-code",
            Self::Database => "database",
        }
    }
}

/// Styling category of a particle travelling down the tube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputCategory {
    Api,
    Geospatial,
    Pdf,
}

impl OutputCategory {
    pub const ALL: [OutputCategory; 3] = [Self::Api, Self::Geospatial, Self::Pdf];

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Api => "api",
            Self::Geospatial => "geospatial",
            Self::Pdf => "pdf",
        }
    }
}
