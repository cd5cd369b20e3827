//! A small DPLL satisfiability solver.
//!
//! Clauses are disjunctions of non-zero integer literals; variable `k` is
//! literal `k`, its negation `-k`. The solver returns one satisfying
//! assignment covering every variable (unconstrained variables come back
//! negative) or reports unsatisfiability.

use cpak_util::errors::CpakError;

/// Solve a CNF over variables `1..=num_vars`.
///
/// The result holds exactly `num_vars` literals in variable order: `k` when
/// variable `k` is true, `-k` when false.
pub fn solve(clauses: &[Vec<i32>], num_vars: usize) -> Result<Vec<i32>, CpakError> {
    let assignment = vec![None; num_vars];
    match dpll(clauses.to_vec(), assignment) {
        Some(assignment) => Ok(assignment
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let var = i as i32 + 1;
                match value {
                    Some(true) => var,
                    // Unconstrained variables default to false.
                    _ => -var,
                }
            })
            .collect()),
        None => Err(CpakError::Unsatisfiable),
    }
}

fn dpll(
    mut clauses: Vec<Vec<i32>>,
    mut assignment: Vec<Option<bool>>,
) -> Option<Vec<Option<bool>>> {
    // Unit propagation to a fixpoint.
    loop {
        if clauses.is_empty() {
            return Some(assignment);
        }
        if clauses.iter().any(|c| c.is_empty()) {
            return None;
        }
        match clauses.iter().find(|c| c.len() == 1).map(|c| c[0]) {
            Some(unit) => {
                assign(&mut assignment, unit);
                clauses = simplify(&clauses, unit);
            }
            None => break,
        }
    }

    // Branch on the first literal of the first clause, then its negation.
    let branch = clauses[0][0];
    for literal in [branch, -branch] {
        let mut candidate = assignment.clone();
        assign(&mut candidate, literal);
        if let Some(solution) = dpll(simplify(&clauses, literal), candidate) {
            return Some(solution);
        }
    }
    None
}

/// Apply a literal: drop satisfied clauses, strip the falsified literal from
/// the rest. A clause stripped to nothing signals a conflict upstream.
fn simplify(clauses: &[Vec<i32>], literal: i32) -> Vec<Vec<i32>> {
    clauses
        .iter()
        .filter(|clause| !clause.contains(&literal))
        .map(|clause| {
            clause
                .iter()
                .copied()
                .filter(|&l| l != -literal)
                .collect()
        })
        .collect()
}

fn assign(assignment: &mut [Option<bool>], literal: i32) {
    let var = literal.unsigned_abs() as usize - 1;
    assignment[var] = Some(literal > 0);
}
