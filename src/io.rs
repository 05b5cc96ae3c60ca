//! Reading the tab-separated network and node-list files and writing the pathway.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, warn};
use ordered_float::OrderedFloat;

use crate::graph::InteractionNetwork;
use crate::pathway::Pathway;
use crate::{Error, Result, Weight};

/// One parsed line of an edge-list file
pub type EdgeRecord = (String, String, Weight);

/// Header line of the pathway output file
pub const OUTPUT_HEADER: &str = "Node1\tNode2";

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Fails with [`Error::MissingInput`] naming the first input file that does not exist
pub fn check_inputs(edges: &Path, sources: &Path, targets: &Path) -> Result<()> {
    for (kind, path) in [("Edges", edges), ("Sources", sources), ("Targets", targets)] {
        if !path.exists() {
            return Err(Error::MissingInput {
                kind,
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Reads an edge list: one `node1<TAB>node2<TAB>weight` per line, no header
pub fn read_network(path: &Path) -> Result<Vec<EdgeRecord>> {
    let file = File::open(path).map_err(io_error(path))?;
    let edges = parse_network(BufReader::new(file), path)?;
    debug!("Read {} edges from {}", edges.len(), path.display());
    Ok(edges)
}

/// Parses edge-list lines; `path` is only used in error messages.
/// Blank lines are skipped, anything else must have exactly three fields.
pub fn parse_network<R: BufRead>(reader: R, path: &Path) -> Result<Vec<EdgeRecord>> {
    let mut edges = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(io_error(path))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let parse_error = |message: String| Error::Parse {
            path: path.to_path_buf(),
            line: index + 1,
            message,
        };

        let fields: Vec<&str> = line.split('\t').collect();
        let [from, to, weight] = fields.as_slice() else {
            return Err(parse_error(format!(
                "expected 3 tab-separated fields, found {}",
                fields.len()
            )));
        };
        let weight: f64 = weight
            .trim()
            .parse()
            .map_err(|_| parse_error(format!("invalid weight '{}'", weight)))?;
        if !weight.is_finite() || weight < 0.0 {
            return Err(parse_error(format!(
                "weight must be a finite non-negative number, got {}",
                weight
            )));
        }
        edges.push((from.to_string(), to.to_string(), OrderedFloat(weight)));
    }
    Ok(edges)
}

/// Reads one node identifier per line, keeping file order
pub fn read_node_list(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(io_error(path))?;
    let nodes = parse_node_list(BufReader::new(file), path)?;
    debug!("Read {} nodes from {}", nodes.len(), path.display());
    Ok(nodes)
}

pub fn parse_node_list<R: BufRead>(reader: R, path: &Path) -> Result<Vec<String>> {
    let mut nodes = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(io_error(path))?;
        let node = line.trim();
        if !node.is_empty() {
            nodes.push(node.to_string());
        }
    }
    Ok(nodes)
}

/// Writes the pathway edges under the `Node1<TAB>Node2` header.
///
/// Missing parent directories are created; an existing file is overwritten.
pub fn write_pathway(path: &Path, pathway: &Pathway, network: &InteractionNetwork<Weight>) -> Result<()> {
    if path.exists() {
        warn!("Output file {} will be overwritten", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    write_edges(&mut writer, pathway, network).map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))?;
    debug!("Wrote {} pathway edges to {}", pathway.edge_count(), path.display());
    Ok(())
}

fn write_edges<Wr: Write>(
    writer: &mut Wr,
    pathway: &Pathway,
    network: &InteractionNetwork<Weight>,
) -> std::io::Result<()> {
    writeln!(writer, "{}", OUTPUT_HEADER)?;
    for &(from, to) in pathway.edges() {
        let (Some(from), Some(to)) = (network.label(from), network.label(to)) else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("pathway edge {} -> {} is not part of the network", from, to),
            ));
        };
        writeln!(writer, "{}\t{}", from, to)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_network_trims_and_skips_blank_lines() {
        let input = "A\tB\t1.5\n\nB\tC\t2\r\n  \n";
        let edges = parse_network(Cursor::new(input), Path::new("edges.txt")).unwrap();
        assert_eq!(
            edges,
            vec![
                ("A".to_string(), "B".to_string(), OrderedFloat(1.5)),
                ("B".to_string(), "C".to_string(), OrderedFloat(2.0)),
            ]
        );
    }

    #[test]
    fn test_parse_network_reports_line_of_bad_field_count() {
        let input = "A\tB\t1\nB\tC\n";
        let err = parse_network(Cursor::new(input), Path::new("edges.txt")).unwrap_err();
        match err {
            Error::Parse { line, message, .. } => {
                assert_eq!(line, 2);
                assert!(message.contains("found 2"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_network_rejects_bad_weights() {
        for input in ["A\tB\theavy\n", "A\tB\t-1\n", "A\tB\tNaN\n", "A\tB\tinf\n"] {
            let result = parse_network(Cursor::new(input), Path::new("edges.txt"));
            assert!(matches!(result, Err(Error::Parse { line: 1, .. })), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_parse_node_list_keeps_order() {
        let nodes = parse_node_list(Cursor::new("P53\n MDM2 \n\nATM\n"), Path::new("sources.txt")).unwrap();
        assert_eq!(nodes, ["P53", "MDM2", "ATM"]);
    }
}
