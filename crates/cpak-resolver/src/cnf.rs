//! CNF encoding of the gathered candidate universe.
//!
//! Each activated node at index `i` becomes SAT variable `i + 1`; a positive
//! literal means "this concrete (name, version) is selected". The clauses
//! enforce exactly one version per name and transitive closure:
//!
//! 1. Names with a single candidate get a unit clause (it must be selected).
//! 2. Names with several candidates get an at-least-one clause over all of
//!    them, plus pairwise exclusions `{¬a, ¬b}` for at-most-one.
//! 3. Every candidate with children gets `selected ⇒ child₁ ∨ child₂ ∨ …`.

use std::collections::HashMap;

use cpak_core::dependency::PackageId;

use crate::gather::ActivatedNode;

/// Build the CNF for a candidate universe. Clause order follows the first
/// appearance of each name in the activated sequence.
pub fn create_cnf(activated: &[ActivatedNode]) -> Vec<Vec<i32>> {
    let index_of: HashMap<&PackageId, usize> = activated
        .iter()
        .enumerate()
        .map(|(i, node)| (&node.package, i))
        .collect();

    // Bucket candidate indices by name, keeping first-appearance order.
    let mut buckets: Vec<Vec<usize>> = Vec::new();
    let mut bucket_of: HashMap<&str, usize> = HashMap::new();
    for (i, node) in activated.iter().enumerate() {
        match bucket_of.get(node.package.name.as_str()) {
            Some(&b) => buckets[b].push(i),
            None => {
                bucket_of.insert(&node.package.name, buckets.len());
                buckets.push(vec![i]);
            }
        }
    }

    let mut clauses: Vec<Vec<i32>> = Vec::new();
    for indices in &buckets {
        if indices.len() == 1 {
            clauses.push(vec![lit(indices[0])]);
        } else {
            // At least one of the candidate versions...
            clauses.push(indices.iter().map(|&i| lit(i)).collect());
            // ...and no two of them together.
            for (pos, &a) in indices.iter().enumerate() {
                for &b in &indices[pos + 1..] {
                    clauses.push(vec![-lit(a), -lit(b)]);
                }
            }
        }

        for &i in indices {
            if let Some(children) = &activated[i].deps {
                let mut clause = vec![-lit(i)];
                for child in children {
                    let child_index = index_of
                        .get(child)
                        .copied()
                        .expect("every child is activated by the gatherer");
                    clause.push(lit(child_index));
                }
                clauses.push(clause);
            }
        }
    }

    clauses
}

fn lit(index: usize) -> i32 {
    index as i32 + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(name: &str, version: &str, deps: Option<Vec<PackageId>>) -> ActivatedNode {
        ActivatedNode {
            package: PackageId::new(name, version),
            deps,
        }
    }

    #[test]
    fn singleton_leaf_gets_unit_clause() {
        let activated = vec![node("foo", "1.0.0", None)];
        assert_eq!(create_cnf(&activated), vec![vec![1]]);
    }

    #[test]
    fn singleton_with_deps_gets_implication() {
        let activated = vec![
            node("a", "1.0.0", Some(vec![PackageId::new("b", "1.0.0")])),
            node("b", "1.0.0", None),
        ];
        let clauses = create_cnf(&activated);
        assert!(clauses.contains(&vec![1]));
        assert!(clauses.contains(&vec![-1, 2]));
        assert!(clauses.contains(&vec![2]));
    }

    #[test]
    fn duplicated_name_gets_exactly_one_encoding() {
        let activated = vec![
            node("c", "1.0.0", None),
            node("c", "2.0.0", None),
            node("c", "3.0.0", None),
        ];
        let clauses = create_cnf(&activated);
        // At least one...
        assert!(clauses.contains(&vec![1, 2, 3]));
        // ...pairwise at most one.
        assert!(clauses.contains(&vec![-1, -2]));
        assert!(clauses.contains(&vec![-1, -3]));
        assert!(clauses.contains(&vec![-2, -3]));
        assert_eq!(clauses.len(), 4);
    }

    #[test]
    fn duplicated_candidate_keeps_its_implication() {
        let activated = vec![
            node("a", "1.0.0", Some(vec![PackageId::new("c", "1.0.0")])),
            node("c", "1.0.0", None),
            node("c", "2.0.0", Some(vec![PackageId::new("a", "1.0.0")])),
        ];
        let clauses = create_cnf(&activated);
        // a's implication on its child, and c@2.0.0's implication back on a.
        assert!(clauses.contains(&vec![-1, 2]));
        assert!(clauses.contains(&vec![-3, 1]));
        // The c bucket still gets selection clauses.
        assert!(clauses.contains(&vec![2, 3]));
        assert!(clauses.contains(&vec![-2, -3]));
    }

    #[test]
    fn variables_are_one_based() {
        let activated = vec![node("x", "1.0.0", None), node("y", "1.0.0", None)];
        let clauses = create_cnf(&activated);
        assert!(clauses.iter().flatten().all(|&l| l != 0));
    }
}
