//! Text output formatting for a completed FM run.

/// Formats a completed partition assignment as the crate's canonical
/// output text:
///
/// ```text
/// Cutsize = <int>
/// G1 <count> <cell>...<cell> ;
/// G2 <count> <cell>...<cell> ;
/// ```
///
/// Cell names within each partition are lexicographically sorted.
pub fn format_output(assignment: &[(String, u8)], cut_size: usize) -> String {
    let mut g0: Vec<&str> = assignment
        .iter()
        .filter(|(_, p)| *p == 0)
        .map(|(name, _)| name.as_str())
        .collect();
    let mut g1: Vec<&str> = assignment
        .iter()
        .filter(|(_, p)| *p == 1)
        .map(|(name, _)| name.as_str())
        .collect();
    g0.sort_unstable();
    g1.sort_unstable();

    let mut out = String::new();
    out.push_str(&format!("Cutsize = {cut_size}\n"));
    out.push_str(&format!("G1 {} {} ;\n", g0.len(), g0.join(" ")));
    out.push_str(&format!("G2 {} {} ;\n", g1.len(), g1.join(" ")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_output_shape() {
        let assignment = vec![
            ("B".to_string(), 0u8),
            ("A".to_string(), 0u8),
            ("D".to_string(), 1u8),
            ("C".to_string(), 1u8),
        ];
        let out = format_output(&assignment, 2);
        assert_eq!(out, "Cutsize = 2\nG1 2 A B ;\nG2 2 C D ;\n");
    }

    #[test]
    fn lexicographic_sort_within_partitions() {
        let assignment = vec![
            ("Z".to_string(), 0u8),
            ("A".to_string(), 0u8),
            ("M".to_string(), 0u8),
        ];
        let out = format_output(&assignment, 0);
        assert_eq!(out, "Cutsize = 0\nG1 3 A M Z ;\nG2 0  ;\n");
    }

    #[test]
    fn empty_partition_renders_zero_count() {
        let assignment: Vec<(String, u8)> = vec![];
        let out = format_output(&assignment, 0);
        assert_eq!(out, "Cutsize = 0\nG1 0  ;\nG2 0  ;\n");
    }
}
