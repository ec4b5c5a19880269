use anyhow::{Context, Result, bail};
use schemars::Schema;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// One promptable parameter of a choice variant, read from its JSON Schema.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

type Object = Map<String, Value>;

/// Fields of the `params` object of the variant tagged `kind_key` in an
/// adjacently tagged (`type` / `params`) enum schema.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let branches = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(Value::as_array)
        .context("missing oneOf/anyOf")?;

    let branch = branches
        .iter()
        .filter_map(Value::as_object)
        .find(|b| {
            b.get("properties")
                .and_then(Value::as_object)
                .is_some_and(|props| tag_matches(props, kind_key))
        });
    let Some(branch) = branch else {
        bail!("no branch found for type={kind_key}");
    };

    let params = branch
        .get("properties")
        .and_then(Value::as_object)
        .and_then(|props| props.get("params"))
        .and_then(Value::as_object)
        .and_then(|p| resolve_ref(root_obj, p));
    let Some(params) = params else {
        return Ok(vec![]);
    };

    let required: Vec<&str> = params
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(props) = params.get("properties").and_then(Value::as_object) else {
        return Ok(vec![]);
    };

    Ok(props
        .iter()
        .filter_map(|(name, field)| {
            let field = field.as_object()?;
            let kind = field_kind(field.get("type"))?;
            let number = |keys: [&str; 2]| keys.iter().find_map(|k| field.get(*k)?.as_f64());
            Some(FieldSpec {
                name: name.clone(),
                title: field
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or(name.as_str())
                    .to_string(),
                description: field
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                required: required.contains(&name.as_str()),
                kind,
                default: field.get("default").cloned(),
                min: number(["minimum", "exclusiveMinimum"]),
                max: number(["maximum", "exclusiveMaximum"]),
            })
        })
        .collect())
}

fn tag_matches(props: &Object, kind_key: &str) -> bool {
    let Some(tag) = props.get("type").and_then(Value::as_object) else {
        return false;
    };
    if tag.get("const").and_then(Value::as_str) == Some(kind_key) {
        return true;
    }
    matches!(
        tag.get("enum").and_then(Value::as_array).map(Vec::as_slice),
        Some([only]) if only.as_str() == Some(kind_key)
    )
}

/// Follows a local `#/$defs/...` reference; objects without `$ref` are
/// returned as is.
fn resolve_ref<'a>(root: &'a Object, obj: &'a Object) -> Option<&'a Object> {
    let Some(reference) = obj.get("$ref") else {
        return Some(obj);
    };
    let path = reference.as_str()?.strip_prefix("#/")?;
    path.split('/').try_fold(root, |cur, raw| {
        let seg = raw.replace("~1", "/").replace("~0", "~");
        cur.get(&seg)?.as_object()
    })
}

fn kind_of(name: &str) -> Option<FieldKind> {
    match name {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    }
}

/// Plain `"type": "integer"` or an `Option<T>` union such as
/// `["integer", "null"]`.
fn field_kind(ty: Option<&Value>) -> Option<FieldKind> {
    match ty? {
        Value::String(s) => kind_of(s),
        Value::Array(arr) => arr.iter().filter_map(Value::as_str).find_map(kind_of),
        _ => None,
    }
}
