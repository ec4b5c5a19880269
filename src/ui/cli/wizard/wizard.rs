use anyhow::{Context, Result};
use inquire::InquireError;
use log::warn;
use serde_json::{Map, Value};
use strum::{EnumMessage, IntoEnumIterator};

use crate::core::{EstimatorError, RevenueRange, Tier};
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::report::render_outcome;
use crate::ui::session::Session;
use crate::ui::types::build::build_command;
use crate::ui::types::choices::{ActionChoice, FieldKind, FieldSpec, UIChoice, specs_for_kind};
use crate::utils::range_parsing::{parse_range, parse_revenue_range};

const DIM_ITALIC: &str = "\x1b[2m\x1b[3m";
const RESET: &str = "\x1b[0m";

fn kind_items<K>() -> Vec<(K, String)>
where
    K: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator,
{
    K::iter()
        .map(|k| {
            let label = k.get_message().unwrap_or_else(|| k.into());
            let text = match k.get_detailed_message() {
                Some(desc) if !desc.is_empty() => format!("{label}  {DIM_ITALIC}{desc}{RESET}"),
                _ => label.to_string(),
            };
            (k, text)
        })
        .collect()
}

/// Optional numeric fields without a default are asked as free text so they
/// can be left blank.
fn prompt_optional_number<D: PromptDriver>(
    driver: &D,
    spec: &FieldSpec,
    init: Option<&Value>,
) -> Result<Option<Value>> {
    let help = spec.description.as_deref().unwrap_or("");
    let def_txt = init.map(|v| v.to_string()).unwrap_or_default();
    let answer = driver.ask_string(
        &spec.title,
        &format!("{help}\n(leave blank for none)"),
        &def_txt,
    )?;
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(None);
    }
    let value = match spec.kind {
        FieldKind::Integer => Value::from(
            answer
                .parse::<u64>()
                .with_context(|| format!("invalid integer for {}", spec.title))?,
        ),
        _ => Value::from(
            answer
                .parse::<f64>()
                .with_context(|| format!("invalid number for {}", spec.title))?,
        ),
    };
    Ok(Some(value))
}

fn prompt_field<D: PromptDriver>(
    driver: &D,
    spec: &FieldSpec,
    defaults: &Value,
) -> Result<Option<Value>> {
    let init = spec
        .default
        .as_ref()
        .or_else(|| defaults.get(&spec.name))
        .filter(|v| !v.is_null());
    let help = spec.description.as_deref().unwrap_or("");

    let numeric = matches!(spec.kind, FieldKind::Integer | FieldKind::Number);
    if numeric && !spec.required && init.is_none() {
        return prompt_optional_number(driver, spec, init);
    }

    let value = match spec.kind {
        FieldKind::Boolean => {
            let def = init.and_then(Value::as_bool).unwrap_or(false);
            Value::Bool(driver.ask_bool(&spec.title, help, def)?)
        }
        FieldKind::String => {
            let def = init.and_then(Value::as_str).unwrap_or_default();
            Value::String(driver.ask_string(&spec.title, help, def)?)
        }
        FieldKind::Integer => {
            let def = init.and_then(Value::as_u64).unwrap_or(0);
            Value::from(driver.ask_u64(
                &spec.title,
                help,
                def,
                spec.min.map(|x| x as u64),
                spec.max.map(|x| x as u64),
            )?)
        }
        FieldKind::Number => {
            let def = init.and_then(Value::as_f64).unwrap_or(0.0);
            Value::from(driver.ask_f64(&spec.title, help, def, spec.min, spec.max)?)
        }
    };
    Ok(Some(value))
}

/// Offers every kind of `C` as a menu, then asks for the chosen kind's
/// parameters field by field.
pub fn prompt_choice<C: UIChoice, D: PromptDriver>(driver: &D) -> Result<C> {
    let items = kind_items::<C::Kind>();
    let labels: Vec<String> = items.iter().map(|(_, text)| text.clone()).collect();
    let index = driver.choose(C::prompt_label(), C::prompt_help(), &labels)?;
    let (kind, _) = items
        .get(index)
        .with_context(|| format!("menu index {index} out of range"))?;
    let kind = *kind;

    let key: &'static str = kind.into();
    let schema = C::schema();
    let specs = specs_for_kind(&schema, key)?;
    let defaults = C::default_params(kind);

    let mut answers = Map::new();
    for spec in &specs {
        if let Some(v) = prompt_field(driver, spec, &defaults)? {
            answers.insert(spec.name.clone(), v);
        }
    }
    if let Some(extra) = C::subprompts(driver, kind)? {
        answers.extend(extra);
    }
    C::from_parts(kind, answers)
}

/// Asks until `parse` accepts the answer; every rejection is reported and the
/// last answer is offered again as the starting text.
fn ask_until_ok<D, T, F>(driver: &D, title: &str, default: &str, parse: F) -> Result<T>
where
    D: PromptDriver,
    F: Fn(&str) -> Result<T, EstimatorError>,
{
    let mut current = default.to_string();
    loop {
        let answer = driver.ask_string(title, "low, high", &current)?;
        match parse(&answer) {
            Ok(v) => return Ok(v),
            Err(e) => {
                warn!("rejected {title}: {e}");
                driver.complain(&e.to_string());
                current = answer;
            }
        }
    }
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Asks the three ranges of every tier, starting from `defaults`.
pub fn prompt_tiers<D: PromptDriver>(driver: &D, defaults: &[Tier]) -> Result<Vec<Tier>> {
    let mut tiers = Vec::with_capacity(defaults.len());
    for tier in defaults {
        let label = capitalized(&tier.name);
        let customers = ask_until_ok(
            driver,
            &format!("{label} Customer Range (low, high):"),
            &tier.customers.to_string(),
            |s| parse_range(&tier.field("customers"), s),
        )?;
        let probability = ask_until_ok(
            driver,
            &format!("{label} Customer Probability (low, high):"),
            &tier.probability.to_string(),
            |s| parse_range(&tier.field("probability"), s),
        )?;
        let default_revenue = match &tier.unit_revenue {
            RevenueRange::Integer(r) => r.to_string(),
            RevenueRange::Real(r) => r.to_string(),
        };
        let unit_revenue = ask_until_ok(
            driver,
            &format!("{label} Revenue Range (low, high):"),
            &default_revenue,
            |s| parse_revenue_range(&tier.field("unit_revenue"), s),
        )?;
        tiers.push(Tier::new(tier.name.clone(), customers, probability, unit_revenue));
    }
    Ok(tiers)
}

fn is_cancel(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<InquireError>(),
        Some(InquireError::OperationCanceled | InquireError::OperationInterrupted)
    )
}

/// Menu loop of the interactive front-end. Input mistakes are reported and
/// the menu shown again; cancelling a prompt (Esc / Ctrl-C) or choosing
/// "Quit" ends the session.
pub fn run_interactive<D: PromptDriver>(driver: &D, session: &mut Session) -> Result<()> {
    loop {
        let choice = match prompt_choice::<ActionChoice, _>(driver) {
            Ok(c) => c,
            Err(e) if is_cancel(&e) => return Ok(()),
            Err(e) if e.downcast_ref::<InquireError>().is_some() => return Err(e),
            Err(e) => {
                driver.complain(&format!("{e:#}"));
                continue;
            }
        };

        let command = match build_command(choice) {
            Ok(Some(c)) => c,
            Ok(None) => return Ok(()),
            Err(e) => {
                driver.complain(&e.to_string());
                continue;
            }
        };

        match session.dispatch(command) {
            Ok(outcome) => driver.show(&render_outcome(&outcome)),
            Err(e) => driver.complain(&e.to_string()),
        }
    }
}
