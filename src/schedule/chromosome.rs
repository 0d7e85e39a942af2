//! Gene / chromosome encoding and single-point crossover.
//!
//! # Encoding
//!
//! A [`Gene`] assigns one section to one course. It stores the course id and
//! the section's index within that course, never a copy of the section, so
//! every gene resolves back to the catalog-owned [`Section`].
//!
//! A [`Chromosome`] is an ordered gene list naming each course at most once.
//! The invariant is enforced on construction: duplicates are dropped with
//! the first occurrence winning. Chromosomes are immutable once built;
//! operators always return new ones.

use std::collections::HashSet;

use rand::Rng;

use crate::catalog::{Catalog, CourseId, Section};
use crate::error::{EnrollError, Result};

/// One `(course, section)` assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gene {
    /// Course code.
    pub course: CourseId,
    /// Index into the course's section list.
    pub section: usize,
}

impl Gene {
    pub fn new(course: impl Into<CourseId>, section: usize) -> Self {
        Self {
            course: course.into(),
            section,
        }
    }

    /// Resolves the gene's section in the catalog.
    ///
    /// # Errors
    ///
    /// [`EnrollError::UnknownCourse`] or [`EnrollError::UnknownSection`] if
    /// the gene points outside the catalog.
    pub fn resolve<'c>(&self, catalog: &'c Catalog) -> Result<&'c Section> {
        catalog
            .course(&self.course)?
            .sections()
            .get(self.section)
            .ok_or_else(|| EnrollError::UnknownSection {
                course: self.course.clone(),
                index: self.section,
            })
    }
}

/// A candidate schedule: at most one section per course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chromosome {
    genes: Vec<Gene>,
}

impl Chromosome {
    /// The empty schedule.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a chromosome, keeping the first gene seen for each course.
    ///
    /// Applying this to an already-unique gene list is the identity.
    pub fn from_genes(genes: impl IntoIterator<Item = Gene>) -> Self {
        let mut seen: HashSet<CourseId> = HashSet::new();
        let genes = genes
            .into_iter()
            .filter(|g| seen.insert(g.course.clone()))
            .collect();
        Self { genes }
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn contains(&self, course: &str) -> bool {
        self.genes.iter().any(|g| g.course.as_str() == course)
    }

    pub fn course_ids(&self) -> impl Iterator<Item = &CourseId> {
        self.genes.iter().map(|g| &g.course)
    }

    /// Resolves every gene into `(course id, section)` pairs.
    pub fn resolve<'a>(&'a self, catalog: &'a Catalog) -> Result<Vec<(&'a CourseId, &'a Section)>> {
        self.genes
            .iter()
            .map(|g| g.resolve(catalog).map(|section| (&g.course, section)))
            .collect()
    }

    /// Sum of the credit hours of every scheduled course.
    pub fn total_credit_hours(&self, catalog: &Catalog) -> Result<u32> {
        self.genes
            .iter()
            .map(|g| catalog.course(&g.course).map(|c| c.credit_hours()))
            .sum()
    }

    /// Returns a copy with the gene at `index` assigned a different section.
    pub(crate) fn with_section(&self, index: usize, section: usize) -> Self {
        let mut genes = self.genes.clone();
        genes[index].section = section;
        Self { genes }
    }
}

impl FromIterator<Gene> for Chromosome {
    fn from_iter<I: IntoIterator<Item = Gene>>(iter: I) -> Self {
        Chromosome::from_genes(iter)
    }
}

/// Single-point crossover at a fixed cut.
///
/// `child_a` is `a[..cut]` followed by the genes of `b[cut..]` whose course is
/// not already present; `child_b` swaps the roles. A cut past the end of a
/// parent takes that parent whole as the prefix and contributes no suffix.
pub fn crossover_at(a: &Chromosome, b: &Chromosome, cut: usize) -> (Chromosome, Chromosome) {
    let cut_a = cut.min(a.len());
    let cut_b = cut.min(b.len());

    let child_a = a.genes[..cut_a]
        .iter()
        .chain(&b.genes[cut_b..])
        .cloned()
        .collect();
    let child_b = b.genes[..cut_b]
        .iter()
        .chain(&a.genes[cut_a..])
        .cloned()
        .collect();

    (child_a, child_b)
}

/// Single-point crossover with a random cut.
///
/// The cut is drawn uniformly from `[1, min(|a|, |b|) - 1]`; when either
/// parent has two or fewer genes the cut is fixed at 1.
///
/// # Complexity
/// O(|a| + |b|)
pub fn crossover<R: Rng>(a: &Chromosome, b: &Chromosome, rng: &mut R) -> (Chromosome, Chromosome) {
    let cut = if a.len() <= 2 || b.len() <= 2 {
        1
    } else {
        rng.random_range(1..a.len().min(b.len()))
    };
    crossover_at(a, b, cut)
}
