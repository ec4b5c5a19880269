use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Error, ErrorKind, Write};
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

pub const EXPORT_HEADER: &str = "Revenue";

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    /// Single column titled `Revenue`, one row per trial.
    #[default]
    Csv,
    /// JSON array of the trial totals.
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        (*self).into()
    }
}

/// Per-trial totals of one run, in trial order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    values: Vec<f64>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }

    pub fn export<P: AsRef<Path>>(&self, path: P, fmt: ExportFormat) -> Result<(), Error> {
        let path = path.as_ref();
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w, fmt)?;
        w.flush()?;
        debug!(
            "exported {} trials to {} as {fmt}",
            self.values.len(),
            path.display()
        );
        Ok(())
    }

    pub fn write_to<W: Write>(&self, w: &mut W, fmt: ExportFormat) -> Result<(), Error> {
        match fmt {
            ExportFormat::Csv => self.write_csv(w),
            ExportFormat::Json => self.write_json(w),
        }
    }

    fn write_csv<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        writeln!(w, "{EXPORT_HEADER}")?;
        for v in &self.values {
            // Debug keeps the shortest round-trip form and always shows a
            // fractional part ("500.0", not "500").
            writeln!(w, "{v:?}")?;
        }
        Ok(())
    }

    fn write_json<W: Write>(&self, w: &mut W) -> Result<(), Error> {
        serde_json::to_writer(&mut *w, &self.values)
            .map_err(|e| Error::new(ErrorKind::InvalidData, e))?;
        writeln!(w)
    }
}

impl From<Vec<f64>> for ResultSet {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl FromIterator<f64> for ResultSet {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn csv_export_has_revenue_header_and_one_row_per_trial() {
        let rs = ResultSet::from(vec![500.0; 5]);

        let tf = NamedTempFile::new().unwrap();
        rs.export(tf.path(), ExportFormat::Csv).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        let exp = "\
Revenue
500.0
500.0
500.0
500.0
500.0
";
        assert_eq!(got, exp);
    }

    #[test]
    fn csv_keeps_trial_order_and_precision() {
        let rs = ResultSet::from(vec![1234.5678, 0.1, 2.0]);
        let mut buf = Vec::new();
        rs.write_to(&mut buf, ExportFormat::Csv).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Revenue\n1234.5678\n0.1\n2.0\n"
        );
    }

    #[test]
    fn json_export_is_plain_array() {
        let rs = ResultSet::from(vec![1.5, 2.0]);
        let tf = NamedTempFile::new().unwrap();
        rs.export(tf.path(), ExportFormat::Json).unwrap();

        let got = fs::read_to_string(tf.path()).unwrap();
        assert_eq!(got, "[1.5,2.0]\n");
    }

    #[test]
    fn empty_csv_is_header_only() {
        let rs = ResultSet::default();
        let mut buf = Vec::new();
        rs.write_to(&mut buf, ExportFormat::Csv).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Revenue\n");
    }

    #[test]
    fn format_parses_from_lowercase_names() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}
