//! Declarative per-field metadata for every record kind.
//!
//! Each kind declares its fields once, as data. The resolver walks these
//! tables generically; adding a record kind means adding a table here and
//! a [`TableSchema`](crate::schema::TableSchema), not new pipeline code.

use std::fmt;

use movebox_model::{Record, RecordKind, Value};

use crate::error::StoreError;
use crate::images;
use crate::resolver::Resolver;

/// How a supplied value is normalized before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// File path → content-addressed image fields
    Image,
    /// Color name or RGB → canonical color name
    Color,
    /// ISO-8601 or `now` → UTC storage format
    Timestamp,
}

/// Computes a value for an absent field from the fields gathered so far.
pub type Generator = fn(&Resolver<'_>, &Record) -> Result<Value, StoreError>;

/// One attribute of a field.
#[derive(Clone, Copy)]
pub enum FieldRule {
    Required,
    References(RecordKind),
    Interpolate(Interpolation),
    Generate(Generator),
    Prompt(&'static str),
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => f.write_str("Required"),
            Self::References(kind) => f.debug_tuple("References").field(kind).finish(),
            Self::Interpolate(how) => f.debug_tuple("Interpolate").field(how).finish(),
            Self::Generate(_) => f.write_str("Generate(..)"),
            Self::Prompt(text) => f.debug_tuple("Prompt").field(text).finish(),
        }
    }
}

/// A declared field and its rules.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rules: &'static [FieldRule],
}

impl FieldSpec {
    pub fn required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, FieldRule::Required))
    }

    pub fn references(&self) -> Option<RecordKind> {
        self.rules.iter().find_map(|r| match r {
            FieldRule::References(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn interpolation(&self) -> Option<Interpolation> {
        self.rules.iter().find_map(|r| match r {
            FieldRule::Interpolate(how) => Some(*how),
            _ => None,
        })
    }

    pub fn generator(&self) -> Option<Generator> {
        self.rules.iter().find_map(|r| match r {
            FieldRule::Generate(g) => Some(*g),
            _ => None,
        })
    }

    pub fn prompt(&self) -> Option<&'static str> {
        self.rules.iter().find_map(|r| match r {
            FieldRule::Prompt(text) => Some(*text),
            _ => None,
        })
    }
}

/// Natural key used by get-or-create, plus companion fields copied from
/// the referencing record when a new row has to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NaturalKey {
    pub column: &'static str,
    pub companions: &'static [&'static str],
}

// ── Field Tables ────────────────────────────────────────────────────────────

use FieldRule::{Generate, Interpolate, Prompt, References, Required};

const ID: FieldSpec = FieldSpec {
    name: "id",
    rules: &[],
};

static LOCATION_FIELDS: &[FieldSpec] = &[
    ID,
    FieldSpec {
        name: "name",
        rules: &[Required, Prompt("location name")],
    },
];

static ROOM_FIELDS: &[FieldSpec] = &[
    ID,
    FieldSpec {
        name: "name",
        rules: &[Required, Prompt("room name")],
    },
    FieldSpec {
        name: "color",
        rules: &[
            Required,
            Prompt("room label color"),
            Interpolate(Interpolation::Color),
        ],
    },
];

static USER_FIELDS: &[FieldSpec] = &[
    ID,
    FieldSpec {
        name: "name",
        rules: &[Required, Prompt("URI user name/address")],
    },
];

static PROJECT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "primary_user",
        rules: &[
            Required,
            References(RecordKind::User),
            Prompt("URI user name/address"),
        ],
    },
    FieldSpec {
        name: "title",
        rules: &[Required, Prompt("project title")],
    },
    FieldSpec {
        name: "found_contact",
        rules: &[Required, Prompt("label found/contact info")],
    },
];

static BATCH_MOVE_FIELDS: &[FieldSpec] = &[
    ID,
    FieldSpec {
        name: "timestamp",
        rules: &[Interpolate(Interpolation::Timestamp)],
    },
    FieldSpec {
        name: "location",
        rules: &[
            Required,
            References(RecordKind::Location),
            Prompt("move destination location"),
        ],
    },
];

static MOVING_BOX_FIELDS: &[FieldSpec] = &[
    ID,
    FieldSpec {
        name: "location",
        rules: &[
            Required,
            References(RecordKind::Location),
            Prompt("box location"),
        ],
    },
    FieldSpec {
        name: "info",
        rules: &[Required, Prompt("box description/info")],
    },
    FieldSpec {
        name: "room",
        rules: &[
            Required,
            References(RecordKind::Room),
            Prompt("box origin/destination room"),
        ],
    },
    FieldSpec {
        name: "user",
        rules: &[
            Required,
            References(RecordKind::User),
            Generate(gen_primary_user),
        ],
    },
    FieldSpec {
        name: "image",
        rules: &[References(RecordKind::Image)],
    },
];

static ITEM_FIELDS: &[FieldSpec] = &[
    ID,
    FieldSpec {
        name: "box",
        rules: &[Required, References(RecordKind::MovingBox)],
    },
    FieldSpec {
        name: "description",
        rules: &[Required, Prompt("item description/info")],
    },
    FieldSpec {
        name: "image",
        rules: &[References(RecordKind::Image)],
    },
];

static BOX_SCAN_FIELDS: &[FieldSpec] = &[
    ID,
    FieldSpec {
        name: "box",
        rules: &[Required, References(RecordKind::MovingBox)],
    },
    FieldSpec {
        name: "batch",
        rules: &[Required, References(RecordKind::BatchMove)],
    },
    FieldSpec {
        name: "user",
        rules: &[
            Required,
            References(RecordKind::User),
            Generate(gen_primary_user),
        ],
    },
    FieldSpec {
        name: "timestamp",
        rules: &[Interpolate(Interpolation::Timestamp)],
    },
];

static IMAGE_FIELDS: &[FieldSpec] = &[
    ID,
    FieldSpec {
        name: "image_file",
        rules: &[
            Required,
            Prompt("image file path"),
            Interpolate(Interpolation::Image),
        ],
    },
    FieldSpec {
        name: "hash",
        rules: &[Required, Generate(gen_hash)],
    },
    FieldSpec {
        name: "mimetype",
        rules: &[Generate(gen_mimetype)],
    },
    FieldSpec {
        name: "encoding",
        rules: &[],
    },
    FieldSpec {
        name: "description",
        rules: &[Prompt("image description")],
    },
    FieldSpec {
        name: "timestamp",
        rules: &[Interpolate(Interpolation::Timestamp)],
    },
];

/// Field table for a record kind, in declaration order.
pub fn field_specs(kind: RecordKind) -> &'static [FieldSpec] {
    match kind {
        RecordKind::Location => LOCATION_FIELDS,
        RecordKind::Room => ROOM_FIELDS,
        RecordKind::User => USER_FIELDS,
        RecordKind::Project => PROJECT_FIELDS,
        RecordKind::BatchMove => BATCH_MOVE_FIELDS,
        RecordKind::MovingBox => MOVING_BOX_FIELDS,
        RecordKind::Item => ITEM_FIELDS,
        RecordKind::BoxScan => BOX_SCAN_FIELDS,
        RecordKind::Image => IMAGE_FIELDS,
    }
}

pub fn field_spec(kind: RecordKind, name: &str) -> Option<&'static FieldSpec> {
    field_specs(kind).iter().find(|f| f.name == name)
}

/// All field names of a kind, in stable order.
pub fn fields(kind: RecordKind) -> Vec<&'static str> {
    field_specs(kind).iter().map(|f| f.name).collect()
}

/// Names of the required fields of a kind.
pub fn required_fields(kind: RecordKind) -> Vec<&'static str> {
    field_specs(kind)
        .iter()
        .filter(|f| f.required())
        .map(|f| f.name)
        .collect()
}

/// Required fields absent from `data`.
pub fn check_missing_fields(kind: RecordKind, data: &Record) -> Vec<&'static str> {
    required_fields(kind)
        .into_iter()
        .filter(|f| !data.contains(f))
        .collect()
}

/// Keys of `data` that are not declared fields of the kind.
pub fn check_allowed_fields(kind: RecordKind, data: &Record) -> Vec<String> {
    data.keys()
        .filter(|k| field_spec(kind, k).is_none())
        .map(str::to_string)
        .collect()
}

/// Natural key of a kind, for kinds that can be referenced by name.
///
/// Images are looked up by content hash instead; see
/// [`Resolver::get_or_create`].
pub fn natural_key(kind: RecordKind) -> Option<NaturalKey> {
    match kind {
        RecordKind::Location | RecordKind::User => Some(NaturalKey {
            column: "name",
            companions: &[],
        }),
        RecordKind::Room => Some(NaturalKey {
            column: "name",
            companions: &["color"],
        }),
        _ => None,
    }
}

// ── Generators ──────────────────────────────────────────────────────────────

/// Default owner of boxes and scans: the project's primary user.
fn gen_primary_user(resolver: &Resolver<'_>, _data: &Record) -> Result<Value, StoreError> {
    resolver.primary_user().map(Value::Integer)
}

/// Content digest of `image_file`, when image interpolation did not run.
fn gen_hash(_resolver: &Resolver<'_>, data: &Record) -> Result<Value, StoreError> {
    let path = data
        .text("image_file")
        .ok_or_else(|| StoreError::MissingFields {
            table: RecordKind::Image.table_name().to_string(),
            fields: vec!["image_file".to_string()],
        })?;
    images::hash_file(std::path::Path::new(path)).map(Value::Text)
}

/// MIME type guessed from the `image_file` name.
fn gen_mimetype(_resolver: &Resolver<'_>, data: &Record) -> Result<Value, StoreError> {
    let guess = data
        .text("image_file")
        .and_then(|p| images::guess_type(std::path::Path::new(p)).mimetype);
    Ok(Value::from(guess))
}
