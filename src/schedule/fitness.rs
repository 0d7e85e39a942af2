//! Fitness evaluation.
//!
//! Scores are integers and **higher is better**. A chromosome that breaks a
//! hard constraint (a time conflict between two of its sections, or a course
//! the student has already passed) scores exactly [`INFEASIBLE`] and is not
//! scored further. Otherwise the score is the sum of course priorities plus
//! one additive term per soft preference:
//!
//! | Preference | Term |
//! |---|---|
//! | `instructor` | `+instructor_bonus` if any section is taught by them |
//! | `days_off`   | `p - |p - (week_days - occupied_days)|` |
//! | `credit`     | `-|p - total_credit_hours|` |

use std::collections::HashSet;

use super::chromosome::Chromosome;
use super::preferences::{Preferences, Scoring};
use crate::catalog::{Catalog, Course, DaySet, Section};
use crate::error::Result;

/// Sentinel score of an unusable individual.
///
/// A feasible schedule can also score 0 (or less, once preference penalties
/// apply), so a score alone does not tell the two apart; use
/// [`is_feasible`] for that.
pub const INFEASIBLE: i64 = 0;

/// Counts the sections, other than the one at `index`, that conflict with it.
///
/// # Panics
/// Panics if `index >= sections.len()`.
pub fn count_gene_conflicts(sections: &[&Section], index: usize) -> usize {
    let section = sections[index];
    sections
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != index && section.has_conflict(other))
        .count()
}

/// Scores a chromosome with the default [`Scoring`] weights.
///
/// # Errors
///
/// Fails if a gene references a course or section absent from the catalog.
pub fn fitness(chromosome: &Chromosome, catalog: &Catalog, preferences: &Preferences) -> Result<i64> {
    evaluate(chromosome, catalog, preferences, &Scoring::default())
}

/// Scores a chromosome.
///
/// Pure with respect to its inputs: the same chromosome, catalog, and
/// preferences always give the same score.
///
/// # Complexity
/// O(n²) in the number of genes (pairwise conflict check).
pub fn evaluate(
    chromosome: &Chromosome,
    catalog: &Catalog,
    preferences: &Preferences,
    scoring: &Scoring,
) -> Result<i64> {
    let (courses, sections) = resolve(chromosome, catalog)?;
    if violates_hard_constraints(&courses, &sections) {
        return Ok(INFEASIBLE);
    }

    let mut score: i64 = 0;
    let mut occupied = DaySet::empty();
    let mut instructors: HashSet<&str> = HashSet::new();
    let mut credit_hours: i64 = 0;

    for (course, section) in courses.iter().zip(&sections) {
        score += i64::from(course.priority());
        occupied = occupied.union(section.days());
        if let Some(instructor) = section.instructor() {
            instructors.insert(instructor);
        }
        credit_hours += i64::from(course.credit_hours());
    }

    if let Some(preferred) = preferences.instructor.as_deref() {
        if instructors.contains(preferred) {
            score += scoring.instructor_bonus;
        }
    }

    if let Some(preferred) = preferences.days_off {
        let preferred = i64::from(preferred);
        let days_off = i64::from(scoring.week_days) - occupied.len() as i64;
        score += preferred - (preferred - days_off).abs();
    }

    if let Some(preferred) = preferences.credit {
        score -= (i64::from(preferred) - credit_hours).abs();
    }

    Ok(score)
}

/// Returns `true` if the chromosome has no time conflict and no passed
/// course.
///
/// # Errors
///
/// Fails if a gene references a course or section absent from the catalog.
pub fn is_feasible(chromosome: &Chromosome, catalog: &Catalog) -> Result<bool> {
    let (courses, sections) = resolve(chromosome, catalog)?;
    Ok(!violates_hard_constraints(&courses, &sections))
}

fn resolve<'c>(chromosome: &Chromosome, catalog: &'c Catalog) -> Result<(Vec<&'c Course>, Vec<&'c Section>)> {
    let courses = chromosome
        .genes()
        .iter()
        .map(|g| catalog.course(&g.course))
        .collect::<Result<_>>()?;
    let sections = chromosome
        .genes()
        .iter()
        .map(|g| g.resolve(catalog))
        .collect::<Result<_>>()?;
    Ok((courses, sections))
}

fn violates_hard_constraints(courses: &[&Course], sections: &[&Section]) -> bool {
    courses
        .iter()
        .enumerate()
        .any(|(i, course)| course.is_passed() || count_gene_conflicts(sections, i) > 0)
}
