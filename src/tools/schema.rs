//! Argument schemas synthesized from function signatures.
//!
//! A [`Signature`] is the static description of a function's parameter list:
//! names, declared types and optional descriptions. [`synthesize`] turns it
//! into an [`ArgsSchema`], which renders as the JSON Schema object handed to
//! models and to [`validate_arguments`](super::validation::validate_arguments).

use std::collections::{BTreeMap, HashMap};

use strum::{Display, EnumString};

/// Type classification of a single parameter.
///
/// Parsing is case-insensitive and accepts common aliases from Rust and
/// scripting vocabularies. Use [`TypeHint::parse`] for lenient parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum TypeHint {
    #[strum(
        to_string = "integer",
        serialize = "int",
        serialize = "i8",
        serialize = "i16",
        serialize = "i32",
        serialize = "i64",
        serialize = "i128",
        serialize = "isize",
        serialize = "u8",
        serialize = "u16",
        serialize = "u32",
        serialize = "u64",
        serialize = "u128",
        serialize = "usize"
    )]
    Integer,
    #[strum(
        to_string = "number",
        serialize = "float",
        serialize = "double",
        serialize = "f32",
        serialize = "f64"
    )]
    Number,
    #[strum(to_string = "string", serialize = "str", serialize = "char")]
    String,
    #[strum(to_string = "boolean", serialize = "bool")]
    Boolean,
    #[strum(
        to_string = "array",
        serialize = "list",
        serialize = "vec",
        serialize = "tuple"
    )]
    Array,
    #[strum(
        to_string = "object",
        serialize = "dict",
        serialize = "map",
        serialize = "hashmap",
        serialize = "btreemap"
    )]
    Object,
    #[strum(to_string = "any", serialize = "untyped", serialize = "value")]
    Untyped,
}

impl TypeHint {
    /// Resolve a textual type annotation.
    ///
    /// Never fails: unknown, empty or malformed names resolve to
    /// [`TypeHint::Untyped`]. Optional wrappers (`Option<T>`, `Optional[T]`)
    /// resolve to their inner type and generic containers to their head
    /// (`Vec<i64>` is an array).
    pub fn parse(annotation: &str) -> Self {
        let annotation = annotation.trim();
        if let Some(inner) = unwrap_optional(annotation) {
            return Self::parse(inner);
        }
        let head = annotation
            .split(['<', '['])
            .next()
            .unwrap_or_default()
            .trim();
        head.parse().unwrap_or(Self::Untyped)
    }

    /// JSON Schema `type` keyword, or `None` when untyped.
    pub fn schema_type(self) -> Option<&'static str> {
        match self {
            Self::Integer => Some("integer"),
            Self::Number => Some("number"),
            Self::String => Some("string"),
            Self::Boolean => Some("boolean"),
            Self::Array => Some("array"),
            Self::Object => Some("object"),
            Self::Untyped => None,
        }
    }
}

fn unwrap_optional(annotation: &str) -> Option<&str> {
    annotation
        .strip_prefix("Option<")
        .and_then(|rest| rest.strip_suffix('>'))
        .or_else(|| {
            annotation
                .strip_prefix("Optional[")
                .and_then(|rest| rest.strip_suffix(']'))
        })
}

/// Rust types with a known schema classification.
pub trait SchemaType {
    fn type_hint() -> TypeHint;
}

macro_rules! impl_schema_type {
    ($hint:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl SchemaType for $ty {
                fn type_hint() -> TypeHint {
                    TypeHint::$hint
                }
            }
        )+
    };
}

impl_schema_type!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_schema_type!(Number => f32, f64);
impl_schema_type!(String => String, &str, char);
impl_schema_type!(Boolean => bool);
impl_schema_type!(Untyped => serde_json::Value);

impl<T: SchemaType> SchemaType for Option<T> {
    fn type_hint() -> TypeHint {
        T::type_hint()
    }
}

impl<T> SchemaType for Vec<T> {
    fn type_hint() -> TypeHint {
        TypeHint::Array
    }
}

impl<K, V> SchemaType for HashMap<K, V> {
    fn type_hint() -> TypeHint {
        TypeHint::Object
    }
}

impl<K, V> SchemaType for BTreeMap<K, V> {
    fn type_hint() -> TypeHint {
        TypeHint::Object
    }
}

impl SchemaType for serde_json::Map<String, serde_json::Value> {
    fn type_hint() -> TypeHint {
        TypeHint::Object
    }
}

/// Declared type of a parameter, optionally with an attached description.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub hint: TypeHint,
    pub description: Option<String>,
}

impl Annotation {
    /// Annotation for a Rust type.
    pub fn of<T: SchemaType>() -> Self {
        Self::from_hint(T::type_hint())
    }

    /// Annotation from a type name; unknown names degrade to untyped.
    pub fn parse(annotation: &str) -> Self {
        Self::from_hint(TypeHint::parse(annotation))
    }

    pub fn untyped() -> Self {
        Self::from_hint(TypeHint::Untyped)
    }

    pub fn from_hint(hint: TypeHint) -> Self {
        Self {
            hint,
            description: None,
        }
    }

    /// Attach a description to the annotation.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Default for Annotation {
    fn default() -> Self {
        Self::untyped()
    }
}

/// Field specification used as a parameter default.
///
/// Carries a description and, optionally, the actual default value. A field
/// spec without a default leaves the parameter required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSpec {
    pub description: Option<String>,
    pub default: Option<serde_json::Value>,
}

impl FieldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Default declared for a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamDefault {
    Value(serde_json::Value),
    Field(FieldSpec),
}

/// One entry of a function's parameter list.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub annotation: Annotation,
    pub default: Option<ParamDefault>,
    /// Implicit receiver (`self`); never part of the schema or the call.
    pub receiver: bool,
}

impl Parameter {
    /// Untyped, required parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self::annotated(name, Annotation::untyped())
    }

    /// Parameter declared with a Rust type.
    pub fn typed<T: SchemaType>(name: impl Into<String>) -> Self {
        Self::annotated(name, Annotation::of::<T>())
    }

    pub fn annotated(name: impl Into<String>, annotation: Annotation) -> Self {
        Self {
            name: name.into(),
            annotation,
            default: None,
            receiver: false,
        }
    }

    /// The implicit receiver of a method-like callable.
    pub fn receiver() -> Self {
        Self {
            receiver: true,
            ..Self::new("self")
        }
    }

    /// Attach a description to the type annotation.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.annotation.description = Some(description.into());
        self
    }

    /// Declare a plain default value.
    pub fn default_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(ParamDefault::Value(value.into()));
        self
    }

    /// Declare a field specification as the default.
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.default = Some(ParamDefault::Field(field));
        self
    }

    /// Effective description; a field spec beats the annotation.
    pub fn description(&self) -> Option<&str> {
        let from_field = match &self.default {
            Some(ParamDefault::Field(field)) => field.description.as_deref(),
            _ => None,
        };
        from_field.or(self.annotation.description.as_deref())
    }

    /// Concrete default value, if any.
    pub fn default(&self) -> Option<&serde_json::Value> {
        match &self.default {
            Some(ParamDefault::Value(value)) => Some(value),
            Some(ParamDefault::Field(field)) => field.default.as_ref(),
            None => None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.default().is_none()
    }
}

/// Ordered parameter list of a function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<Parameter>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a parameter.
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// All declared parameters, receiver included.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Parameters that callers pass by name.
    pub fn arguments(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| !p.receiver)
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.arguments().find(|p| p.name == name)
    }
}

impl FromIterator<Parameter> for Signature {
    fn from_iter<I: IntoIterator<Item = Parameter>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

/// Schema entry for one argument.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    pub name: String,
    pub type_hint: TypeHint,
    pub description: Option<String>,
    pub default: Option<serde_json::Value>,
    pub required: bool,
}

impl SchemaEntry {
    fn property(&self) -> serde_json::Value {
        let mut property = serde_json::Map::new();
        if let Some(ty) = self.type_hint.schema_type() {
            property.insert("type".into(), ty.into());
        }
        if let Some(description) = &self.description {
            property.insert("description".into(), description.clone().into());
        }
        if let Some(default) = &self.default {
            property.insert("default".into(), default.clone());
        }
        serde_json::Value::Object(property)
    }
}

/// Argument schema of a tool: one entry per non-receiver parameter, in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgsSchema {
    entries: Vec<SchemaEntry>,
}

impl ArgsSchema {
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&SchemaEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of arguments without a default.
    pub fn required(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.required)
            .map(|e| e.name.as_str())
            .collect()
    }

    /// Render as a JSON Schema object.
    pub fn schema(&self) -> serde_json::Value {
        let properties: serde_json::Map<String, serde_json::Value> = self
            .entries
            .iter()
            .map(|e| (e.name.clone(), e.property()))
            .collect();
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": self.required(),
        })
    }
}

/// Derive the argument schema of a signature.
pub fn synthesize(signature: &Signature) -> ArgsSchema {
    let entries = signature
        .arguments()
        .map(|param| SchemaEntry {
            name: param.name.clone(),
            type_hint: param.annotation.hint,
            description: param.description().map(str::to_string),
            default: param.default().cloned(),
            required: param.is_required(),
        })
        .collect();
    ArgsSchema { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn classifies_int_float_and_untyped() {
        let signature = Signature::new()
            .param(Parameter::typed::<i64>("a"))
            .param(Parameter::typed::<f64>("b"))
            .param(Parameter::new("c"));

        let schema = synthesize(&signature).schema();

        assert_eq!(schema["properties"]["a"]["type"], "integer");
        assert_eq!(schema["properties"]["b"]["type"], "number");
        assert!(schema["properties"]["c"].get("type").is_none());
        assert!(schema["properties"]["c"].is_object());
    }

    #[test]
    fn textual_annotations_resolve_leniently() {
        assert_eq!(TypeHint::parse("int"), TypeHint::Integer);
        assert_eq!(TypeHint::parse(" FLOAT "), TypeHint::Number);
        assert_eq!(TypeHint::parse("Option<u32>"), TypeHint::Integer);
        assert_eq!(TypeHint::parse("Optional[float]"), TypeHint::Number);
        assert_eq!(TypeHint::parse("Vec<i64>"), TypeHint::Array);
        assert_eq!(TypeHint::parse("dict[str, int]"), TypeHint::Object);
        assert_eq!(TypeHint::parse("MyCustomType"), TypeHint::Untyped);
        assert_eq!(TypeHint::parse(""), TypeHint::Untyped);
        assert_eq!(TypeHint::parse("<<>>[["), TypeHint::Untyped);
    }

    #[test]
    fn unresolvable_annotation_yields_untyped_entry() {
        let signature = Signature::new().param(Parameter::annotated(
            "widget",
            Annotation::parse("some.module.Widget"),
        ));

        let schema = synthesize(&signature);

        assert_eq!(schema.get("widget").unwrap().type_hint, TypeHint::Untyped);
        assert!(schema.schema()["properties"]["widget"].get("type").is_none());
    }

    #[test]
    fn annotation_description_populates_entry() {
        let signature = Signature::new()
            .param(Parameter::typed::<i64>("a").describe("the first number"))
            .param(Parameter::typed::<f64>("b"));

        let schema = synthesize(&signature).schema();

        assert_eq!(schema["properties"]["a"]["description"], "the first number");
        assert!(schema["properties"]["b"].get("description").is_none());
    }

    #[test]
    fn field_description_populates_entry() {
        let signature = Signature::new()
            .param(
                Parameter::typed::<i64>("a")
                    .field(FieldSpec::new().description("The first number.")),
            )
            .param(Parameter::typed::<f64>("b").default_value(serde_json::Value::Null));

        let schema = synthesize(&signature);
        let json = schema.schema();

        assert_eq!(json["properties"]["a"]["description"], "The first number.");
        assert!(json["properties"]["b"].get("description").is_none());
        assert_eq!(schema.required(), vec!["a"]);
    }

    #[test]
    fn field_description_beats_annotation_description() {
        let signature = Signature::new().param(
            Parameter::typed::<i64>("a")
                .describe("from annotation")
                .field(FieldSpec::new().description("from field")),
        );

        let schema = synthesize(&signature);

        assert_eq!(
            schema.get("a").unwrap().description.as_deref(),
            Some("from field")
        );
    }

    #[test]
    fn field_without_description_keeps_annotation_description() {
        let param = Parameter::typed::<i64>("a")
            .describe("from annotation")
            .field(FieldSpec::new().default_value(1));

        assert_eq!(param.description(), Some("from annotation"));
        assert!(!param.is_required());
    }

    #[test]
    fn receiver_is_excluded_and_order_is_kept() {
        let signature = Signature::new()
            .param(Parameter::receiver())
            .param(Parameter::typed::<String>("zeta"))
            .param(Parameter::typed::<bool>("alpha"))
            .param(Parameter::new("mid"));

        let schema = synthesize(&signature);
        let names: Vec<&str> = schema.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);

        let json = schema.schema();
        let keys: Vec<&str> = json["properties"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn defaults_appear_in_schema() {
        let signature = Signature::new()
            .param(Parameter::typed::<u32>("sides").default_value(6));

        let schema = synthesize(&signature).schema();

        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": { "sides": { "type": "integer", "default": 6 } },
                "required": [],
            })
        );
    }
}
