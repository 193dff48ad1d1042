//! Parsing of network structure definitions.
//!
//! A structure definition lists one variable per line, parents after the name:
//!
//! ```text
//! Burglary:
//! Earthquake:
//! Alarm: Burglary Earthquake
//! ```
//!
//! Parents must be declared on an earlier line. Their order on the line fixes the bit order of
//! the variable's CPT index (first parent = most significant bit).

use std::fs;
use std::path::Path;

use log::info;

use crate::model::{Network, NetworkBuilder};
use crate::util::{CptError, Result};

/// The character that terminates the variable name on each line
pub const NAME_DELIMITER: char = ':';

/// Build a `Network` from the text of a structure definition. Blank lines are skipped.
pub fn parse_structure(text: &str) -> Result<Network> {
    let mut builder = NetworkBuilder::new();

    for (n, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let head = match tokens.next() {
            Some(head) => head,
            None => continue
        };

        let name = head.strip_suffix(NAME_DELIMITER)
                       .filter(|name| !name.is_empty())
                       .ok_or_else(|| CptError::MalformedStructure {
                           line: n + 1,
                           text: line.to_string()
                       })?;

        let parents: Vec<&str> = tokens.collect();
        builder = builder.with_variable(name, &parents);
    }

    builder.build()
}

/// Read and parse a structure definition file
pub fn read_structure<P: AsRef<Path>>(path: P) -> Result<Network> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| CptError::io(path, e))?;
    let network = parse_structure(&text)?;
    info!("loaded {} variables from {}", network.len(), path.display());
    Ok(network)
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn roots_and_children() {
        let network = parse_structure("A:\nB: A\nC: B A\n").unwrap();

        assert_eq!(3, network.len());
        let a = network.lookup("A").unwrap();
        let b = network.lookup("B").unwrap();
        let c = network.lookup("C").unwrap();
        assert!(!network.variable(a).has_parents());
        assert_eq!(&[a], network.variable(b).parents());
        assert_eq!(&[b, a], network.variable(c).parents());
    }

    #[test]
    fn tolerates_spacing_and_blank_lines() {
        let network = parse_structure("\n  A:   \n\nB:\tA  \r\n").unwrap();
        assert_eq!(2, network.len());
        assert_eq!(1, network.variable(network.lookup("B").unwrap()).parents().len());
    }

    #[test]
    fn parent_must_come_first() {
        let result = parse_structure("B: A\nA:\n");
        assert!(matches!(result, Err(CptError::MissingParent { .. })));
    }

    #[test]
    fn name_needs_delimiter() {
        match parse_structure("A:\nB A\n") {
            Err(CptError::MalformedStructure { line, text }) => {
                assert_eq!(2, line);
                assert_eq!("B A", text);
            },
            other => panic!("unexpected result {:?}", other)
        }

        assert!(matches!(parse_structure(": A"), Err(CptError::MalformedStructure { line: 1, .. })));
    }

    #[test]
    fn empty_definition_is_empty_network() {
        assert!(parse_structure("").unwrap().is_empty());
    }

    #[test]
    fn missing_file() {
        let result = read_structure("/definitely/not/here/network.txt");
        assert!(matches!(result, Err(CptError::Io { .. })));
    }
}
