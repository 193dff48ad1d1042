//! Writers for the outputs of the command line tools.
//!
//! Every writer renders into any `io::Write`; `write_file` renders fully in memory first so that a
//! failure never leaves a half-written file behind.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use itertools::Itertools;
use log::info;

use crate::model::Network;
use crate::util::{CptError, Result};
use crate::variable::Assignment;
use super::dataset::{TestSet, FALSE_TOKEN, TRUE_TOKEN};


fn token(value: bool) -> &'static str {
    if value { TRUE_TOKEN } else { FALSE_TOKEN }
}

/// Write the learned CPTs of `network`.
///
/// One block per variable, in declaration order:
///
/// ```text
/// Alarm:
/// Burglary Earthquake
/// 0, 0, 0.0012
/// 0, 1, 0.29
/// 1, 0, 0.94
/// 1, 1, 0.95
///
/// ```
///
/// The parents line is left out for a root. Rows run over masks ```0..2^P```, the bits printed
/// first parent first, followed by ```P(variable = true | parents)```.
pub fn write_estimates<W: Write>(network: &Network, mut out: W) -> Result<()> {
    let origin = Path::new("<estimates>");
    let io_err = |e: io::Error| CptError::io(origin, e);

    for (_, var) in network.variables() {
        writeln!(out, "{}:", var.name()).map_err(io_err)?;

        let num_parents = var.parents().len();
        if var.has_parents() {
            writeln!(out, "{}", var.parents().iter().map(|&p| network.name(p)).join(" ")).map_err(io_err)?;
        }

        for mask in 0..var.num_configurations() {
            let p = var.probability(mask).ok_or_else(|| CptError::Untrained(var.name().to_string()))?;
            let bits = (0..num_parents).rev().map(|bit| (mask >> bit) & 1);
            writeln!(out, "{}", bits.map(|b| b.to_string()).chain(Some(p.to_string())).join(", ")).map_err(io_err)?;
        }

        writeln!(out).map_err(io_err)?;
    }
    Ok(())
}

/// Write a completed test file: the header as read, then each record with its unknown column
/// replaced by the prediction (`1` or `0`).
///
/// # Args
/// * `predictions`: one decision per record of `test_set`, in order
pub fn write_predictions<W: Write>(test_set: &TestSet, predictions: &[bool], out: W) -> Result<()> {
    let origin = Path::new("<predictions>");
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(test_set.headers()).map_err(|e| CptError::csv(origin, e))?;

    for (record, &prediction) in test_set.records().iter().zip(predictions) {
        let query_column = test_set.binding().column(record.query());
        let row = record.fields().iter().enumerate().map(|(col, field)| {
            if col == query_column { token(prediction) } else { field.as_str() }
        });
        writer.write_record(row).map_err(|e| CptError::csv(origin, e))?;
    }

    writer.flush().map_err(|e| CptError::io(origin, e))
}

/// Write complete samples as a dataset that `read_training` accepts: a header of variable names,
/// then one row of `1`/`0` per sample.
pub fn write_samples<W: Write>(network: &Network, samples: &[Assignment], out: W) -> Result<()> {
    let origin = Path::new("<samples>");
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(network.variables().map(|(_, v)| v.name())).map_err(|e| CptError::csv(origin, e))?;

    for sample in samples {
        let row = network.ids()
                         .map(|id| sample.get(id).map(token).ok_or_else(|| CptError::MissingValue(network.name(id).to_string())))
                         .collect::<Result<Vec<&str>>>()?;
        writer.write_record(row).map_err(|e| CptError::csv(origin, e))?;
    }

    writer.flush().map_err(|e| CptError::io(origin, e))
}

/// Render with `render` into memory, then write the result to `path` in one go
pub fn write_file<P, F>(path: P, render: F) -> Result<()>
    where P: AsRef<Path>,
          F: FnOnce(&mut Vec<u8>) -> Result<()>
{
    let path = path.as_ref();
    let mut buffer = Vec::new();
    render(&mut buffer)?;
    fs::write(path, &buffer).map_err(|e| CptError::io(path, e))?;
    info!("wrote {} bytes to {}", buffer.len(), path.display());
    Ok(())
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::data::dataset::{test_from_reader, TokenPolicy};
    use crate::data::structure::parse_structure;
    use crate::estimators::{Estimator, LaplaceEstimator};

    fn trained(structure: &str, rows: &[&[(&str, bool)]]) -> Network {
        let mut network = parse_structure(structure).unwrap();
        let dataset: Vec<Assignment> = rows.iter().map(|row| {
            row.iter().map(|&(name, value)| (network.lookup(name).unwrap(), value)).collect()
        }).collect();
        LaplaceEstimator::new(&mut network).estimate(dataset.iter()).unwrap();
        network
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> Result<()>>(f: F) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn estimates_layout() {
        let network = trained("A:\nB: A\n", &[
            &[("A", true), ("B", true)],
            &[("A", true), ("B", false)],
            &[("A", false), ("B", false)],
            &[("A", false), ("B", false)],
        ]);

        let text = render(|buf| write_estimates(&network, buf));
        assert_eq!("A:\n0.5\n\nB:\nA\n0, 0.25\n1, 0.5\n\n", text);
    }

    #[test]
    fn estimates_bits_first_parent_first() {
        let network = trained("X:\nY:\nZ: X Y\n", &[&[("X", true), ("Y", false), ("Z", true)]]);

        let text = render(|buf| write_estimates(&network, buf));
        let z_block: Vec<&str> = text.split("\n\n").nth(2).unwrap().lines().collect();
        assert_eq!("Z:", z_block[0]);
        assert_eq!("X Y", z_block[1]);
        assert_eq!("0, 0, 0.5", z_block[2]);
        assert_eq!("0, 1, 0.5", z_block[3]);
        // X = 1, Y = 0 is the only observed configuration: 2 / 3
        assert!(z_block[4].starts_with("1, 0, 0.666"));
        assert_eq!("1, 1, 0.5", z_block[5]);
    }

    #[test]
    fn untrained_estimates_fail() {
        let network = parse_structure("A:\n").unwrap();
        let result = write_estimates(&network, Vec::new());
        assert!(matches!(result, Err(CptError::Untrained(ref n)) if n == "A"));
    }

    #[test]
    fn predictions_replace_only_the_unknown() {
        let network = parse_structure("A:\nB: A\n").unwrap();
        let set = test_from_reader("id,A,B\nr1,1,?\nr2,?,0\n".as_bytes(), &network, TokenPolicy::Strict).unwrap();

        let text = render(|buf| write_predictions(&set, &[true, false], buf));
        assert_eq!("id,A,B\nr1,1,1\nr2,0,0\n", text);
    }

    #[test]
    fn predictions_echo_other_fields_verbatim() {
        let network = parse_structure("A:\nB: A\n").unwrap();
        let set = test_from_reader("A,B,note\n 1 ,?, padded note \n".as_bytes(), &network, TokenPolicy::Strict).unwrap();

        let text = render(|buf| write_predictions(&set, &[false], buf));
        assert_eq!("A,B,note\n 1 ,0, padded note \n", text);
    }

    #[test]
    fn samples_layout() {
        let network = parse_structure("A:\nB: A\n").unwrap();
        let a = network.lookup("A").unwrap();
        let b = network.lookup("B").unwrap();
        let samples: Vec<Assignment> = vec![
            vec![(a, true), (b, false)].into_iter().collect(),
            vec![(a, false), (b, false)].into_iter().collect(),
        ];

        let text = render(|buf| write_samples(&network, &samples, buf));
        assert_eq!("A,B\n1,0\n0,0\n", text);
    }

    #[test]
    fn write_file_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let result = write_file(&path, |buf| {
            buf.extend_from_slice(b"partial");
            Err(CptError::Untrained(String::from("A")))
        });
        assert!(result.is_err());
        assert!(!path.exists());

        write_file(&path, |buf| {
            buf.extend_from_slice(b"done");
            Ok(())
        }).unwrap();
        assert_eq!("done", fs::read_to_string(&path).unwrap());
    }
}
