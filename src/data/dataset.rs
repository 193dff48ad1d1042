//! Reading of comma-separated datasets.
//!
//! The first row of a dataset is a header. Every column whose header equals a variable name
//! holds that variable's value; other columns are carried along but never interpreted. Values
//! are `1` for true and `0` for false. In a test file exactly one variable column of each row
//! holds `?`, the variable to infer for that row.
//!
//! Fields are kept exactly as read. Surrounding whitespace is ignored only where a header is
//! matched to a variable or a value token is interpreted.

use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use crate::model::Network;
use crate::util::{CptError, Result};
use crate::variable::{Assignment, VarId};

pub const TRUE_TOKEN: &str = "1";
pub const FALSE_TOKEN: &str = "0";
pub const UNKNOWN_TOKEN: &str = "?";

/// Label used in errors for data that did not come from a file
const READER_ORIGIN: &str = "<reader>";


/// How tokens other than `1` are interpreted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenPolicy {

    /// `1` is true, `0` is false, anything else is an error
    #[default]
    Strict,

    /// `1` is true, anything else is false
    Lenient
}

impl TokenPolicy {

    /// Interpret a single value token
    fn parse(&self, token: &str, line: usize, column: &str) -> Result<bool> {
        match (*self, token) {
            (_, TRUE_TOKEN) => Ok(true),
            (TokenPolicy::Strict, FALSE_TOKEN) | (TokenPolicy::Lenient, _) => Ok(false),
            (TokenPolicy::Strict, _) => Err(CptError::InvalidToken {
                line,
                column: column.to_string(),
                token: token.to_string()
            })
        }
    }
}


/// The column of every variable of a `Network` within one file, resolved from its header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnBinding {

    /// Column index of each variable, indexed by `VarId`
    columns: Vec<usize>

}

impl ColumnBinding {

    /// Match the header against the variable names of `network`.
    ///
    /// # Returns
    /// the binding, or an error if a variable has no column or more than one
    pub fn bind(network: &Network, headers: &StringRecord) -> Result<Self> {
        let mut columns: Vec<Option<usize>> = vec![None; network.len()];

        for (col, header) in headers.iter().enumerate() {
            if let Some(id) = network.lookup(header.trim()) {
                if columns[id.index()].replace(col).is_some() {
                    return Err(CptError::DuplicateColumn(header.trim().to_string()));
                }
            }
        }

        let columns = network.ids()
                             .zip(columns)
                             .map(|(id, col)| col.ok_or_else(|| CptError::UnboundVariable(network.name(id).to_string())))
                             .collect::<Result<Vec<usize>>>()?;

        debug!("bound {} of {} columns", columns.len(), headers.len());
        Ok(ColumnBinding { columns })
    }

    /// The column holding `id`
    pub fn column(&self, id: VarId) -> usize {
        self.columns[id.index()]
    }
}


/// One row of a test file: the raw fields, the variable to infer, and the observed values of
/// every other variable.
#[derive(Clone, Debug)]
pub struct TestRecord {
    fields: Vec<String>,
    query: VarId,
    evidence: Assignment
}

impl TestRecord {

    /// The fields of the row as read, including the `?`
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The variable marked unknown in this row
    pub fn query(&self) -> VarId {
        self.query
    }

    pub fn evidence(&self) -> &Assignment {
        &self.evidence
    }
}


/// A parsed test file
#[derive(Clone, Debug)]
pub struct TestSet {
    headers: Vec<String>,
    binding: ColumnBinding,
    records: Vec<TestRecord>
}

impl TestSet {

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn binding(&self) -> &ColumnBinding {
        &self.binding
    }

    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


/// Read a training file into one complete `Assignment` per row
pub fn read_training<P: AsRef<Path>>(path: P, network: &Network, policy: TokenPolicy) -> Result<Vec<Assignment>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CptError::io(path, e))?;
    let rows = parse_training(file, network, policy, path)?;
    info!("read {} training rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read training data from any reader
pub fn training_from_reader<R: io::Read>(reader: R, network: &Network, policy: TokenPolicy) -> Result<Vec<Assignment>> {
    parse_training(reader, network, policy, Path::new(READER_ORIGIN))
}

/// Read a test file
pub fn read_test<P: AsRef<Path>>(path: P, network: &Network, policy: TokenPolicy) -> Result<TestSet> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CptError::io(path, e))?;
    let test_set = parse_test(file, network, policy, path)?;
    info!("read {} test rows from {}", test_set.len(), path.display());
    Ok(test_set)
}

/// Read test data from any reader
pub fn test_from_reader<R: io::Read>(reader: R, network: &Network, policy: TokenPolicy) -> Result<TestSet> {
    parse_test(reader, network, policy, Path::new(READER_ORIGIN))
}


/// Internal: open a CSV reader and bind its header
fn open<R: io::Read>(reader: R, network: &Network, origin: &Path) -> Result<(csv::Reader<R>, StringRecord, ColumnBinding)> {
    let mut reader = ReaderBuilder::new().has_headers(true)
                                         .trim(Trim::None)
                                         .from_reader(reader);
    let headers = reader.headers().map_err(|e| CptError::csv(origin, e))?.clone();
    let binding = ColumnBinding::bind(network, &headers)?;
    Ok((reader, headers, binding))
}

/// Internal: the 1-based line of a record, for error messages
fn line_of(record: &StringRecord, row: usize) -> usize {
    record.position().map_or(row + 2, |p| p.line() as usize)
}

fn parse_training<R: io::Read>(reader: R, network: &Network, policy: TokenPolicy, origin: &Path) -> Result<Vec<Assignment>> {
    let (mut reader, headers, binding) = open(reader, network, origin)?;

    let rows = reader.records().enumerate().map(|(row, record)| -> Result<Assignment> {
        let record = record.map_err(|e| CptError::csv(origin, e))?;
        let line = line_of(&record, row);

        network.ids().map(|id| {
            let col = binding.column(id);
            let token = record[col].trim();
            if token == UNKNOWN_TOKEN {
                return Err(CptError::UnexpectedUnknown { line, column: headers[col].trim().to_string() });
            }
            policy.parse(token, line, headers[col].trim()).map(|value| (id, value))
        }).collect::<Result<Assignment>>()
    }).collect::<Result<Vec<Assignment>>>()?;

    Ok(rows)
}

fn parse_test<R: io::Read>(reader: R, network: &Network, policy: TokenPolicy, origin: &Path) -> Result<TestSet> {
    let (mut reader, headers, binding) = open(reader, network, origin)?;

    let records = reader.records().enumerate().map(|(row, record)| -> Result<TestRecord> {
        let record = record.map_err(|e| CptError::csv(origin, e))?;
        let line = line_of(&record, row);

        let mut unknowns = Vec::new();
        let mut evidence = Assignment::new();
        for id in network.ids() {
            let col = binding.column(id);
            match record[col].trim() {
                UNKNOWN_TOKEN => unknowns.push(id),
                token => evidence.set(id, policy.parse(token, line, headers[col].trim())?)
            }
        }

        match unknowns.as_slice() {
            &[query] => Ok(TestRecord {
                fields: record.iter().map(String::from).collect(),
                query,
                evidence
            }),
            _ => Err(CptError::UnknownCount { line, found: unknowns.len() })
        }
    }).collect::<Result<Vec<TestRecord>>>()?;

    Ok(TestSet {
        headers: headers.iter().map(String::from).collect(),
        binding,
        records
    })
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::data::structure::parse_structure;

    fn network() -> Network {
        parse_structure("A:\nB: A\n").unwrap()
    }

    #[test]
    fn binding_ignores_extra_columns_and_order() {
        let network = network();
        let headers = StringRecord::from(vec!["id", "B", "note", "A"]);
        let binding = ColumnBinding::bind(&network, &headers).unwrap();

        assert_eq!(3, binding.column(network.lookup("A").unwrap()));
        assert_eq!(1, binding.column(network.lookup("B").unwrap()));
    }

    #[test]
    fn binding_requires_every_variable() {
        let network = network();
        let result = ColumnBinding::bind(&network, &StringRecord::from(vec!["A", "C"]));
        assert!(matches!(result, Err(CptError::UnboundVariable(ref n)) if n == "B"));
    }

    #[test]
    fn binding_rejects_repeated_column() {
        let network = network();
        let result = ColumnBinding::bind(&network, &StringRecord::from(vec!["A", "B", "A"]));
        assert!(matches!(result, Err(CptError::DuplicateColumn(ref n)) if n == "A"));
    }

    #[test]
    fn training_rows() {
        let network = network();
        let a = network.lookup("A").unwrap();
        let b = network.lookup("B").unwrap();

        let rows = training_from_reader("A,B\n1,1\n1,0\n0, 0\n".as_bytes(), &network, TokenPolicy::Strict).unwrap();
        assert_eq!(3, rows.len());
        assert_eq!(Some(true), rows[0].get(a));
        assert_eq!(Some(true), rows[0].get(b));
        assert_eq!(Some(false), rows[1].get(b));
        assert_eq!(Some(false), rows[2].get(a));
    }

    #[test]
    fn strict_policy_rejects_garbage() {
        let network = network();
        match training_from_reader("A,B\n1,1\n1,yes\n".as_bytes(), &network, TokenPolicy::Strict) {
            Err(CptError::InvalidToken { line, column, token }) => {
                assert_eq!(3, line);
                assert_eq!("B", column);
                assert_eq!("yes", token);
            },
            other => panic!("unexpected result {:?}", other)
        }
    }

    #[test]
    fn lenient_policy_reads_garbage_as_false() {
        let network = network();
        let b = network.lookup("B").unwrap();
        let rows = training_from_reader("A,B\n1,yes\n".as_bytes(), &network, TokenPolicy::Lenient).unwrap();
        assert_eq!(Some(false), rows[0].get(b));
    }

    #[test]
    fn ragged_row_is_an_error() {
        let network = network();
        let result = training_from_reader("A,B\n1,1\n1\n".as_bytes(), &network, TokenPolicy::Strict);
        assert!(matches!(result, Err(CptError::Csv { .. })));
    }

    #[test]
    fn unknown_in_training_is_an_error() {
        let network = network();
        let result = training_from_reader("A,B\n?,1\n".as_bytes(), &network, TokenPolicy::Lenient);
        assert!(matches!(result, Err(CptError::UnexpectedUnknown { line: 2, .. })));
    }

    #[test]
    fn test_rows() {
        let network = network();
        let a = network.lookup("A").unwrap();
        let b = network.lookup("B").unwrap();

        let set = test_from_reader("A,B,id\n1,?,x\n?,0,y\n".as_bytes(), &network, TokenPolicy::Strict).unwrap();
        assert_eq!(&["A", "B", "id"], set.headers());
        assert_eq!(2, set.len());

        let first = &set.records()[0];
        assert_eq!(b, first.query());
        assert_eq!(Some(true), first.evidence().get(a));
        assert!(!first.evidence().contains(b));
        assert_eq!(&["1", "?", "x"], first.fields());

        assert_eq!(a, set.records()[1].query());
    }

    #[test]
    fn test_row_needs_exactly_one_unknown() {
        let network = network();

        let none = test_from_reader("A,B\n1,0\n".as_bytes(), &network, TokenPolicy::Strict);
        assert!(matches!(none, Err(CptError::UnknownCount { line: 2, found: 0 })));

        let two = test_from_reader("A,B\n1,?\n?,?\n".as_bytes(), &network, TokenPolicy::Strict);
        assert!(matches!(two, Err(CptError::UnknownCount { line: 3, found: 2 })));
    }

    #[test]
    fn padded_fields_are_kept_as_read() {
        let network = network();
        let a = network.lookup("A").unwrap();
        let b = network.lookup("B").unwrap();

        let set = test_from_reader(" A ,B,note\n 1 , ?, padded note \n".as_bytes(), &network, TokenPolicy::Strict).unwrap();
        assert_eq!(&[" A ", "B", "note"], set.headers());

        let record = &set.records()[0];
        assert_eq!(b, record.query());
        assert_eq!(Some(true), record.evidence().get(a));
        assert_eq!(&[" 1 ", " ?", " padded note "], record.fields());
    }

    #[test]
    fn unknown_in_ignored_column_does_not_count() {
        let network = network();
        let set = test_from_reader("A,B,note\n1,?,?\n".as_bytes(), &network, TokenPolicy::Strict).unwrap();
        assert_eq!(1, set.len());
    }
}
