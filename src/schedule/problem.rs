//! Course-selection GA problem definition.
//!
//! Implements [`GaProblem`] for choosing one term's course sections. Bridges
//! the catalog model to the generic GA engine.

use rand::seq::{index, IndexedRandom};
use rand::Rng;

use super::chromosome::{self, Chromosome, Gene};
use super::fitness;
use super::preferences::{Preferences, Scoring};
use crate::catalog::{Catalog, CourseId};
use crate::error::{EnrollError, Result};
use crate::ga::GaProblem;

/// GA problem for one student's term.
///
/// Holds a shared borrow of the catalog for its whole lifetime, so the
/// catalog cannot change while a search is running.
///
/// # Example
/// ```
/// use u_enroll::catalog::{Catalog, Course, Section, TimeWindow};
/// use u_enroll::ga::{GaConfig, GaRunner};
/// use u_enroll::schedule::{CourseProblem, Preferences};
///
/// let catalog: Catalog = [Course::new("MATH1411", 4).with_sections([
///     Section::new(1, "lecture").meeting("MW".parse().unwrap(), TimeWindow::parse("08:00", "09:25").unwrap()),
/// ])]
/// .into_iter()
/// .collect();
///
/// let problem = CourseProblem::new(catalog.eligible_pool(), &catalog, Preferences::default()).unwrap();
/// let result = GaRunner::run(&problem, &GaConfig::fast().with_seed(1)).unwrap();
/// assert_eq!(result.best.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CourseProblem<'c> {
    catalog: &'c Catalog,
    pool: Vec<CourseId>,
    preferences: Preferences,
    scoring: Scoring,
    min_courses: usize,
    max_courses: usize,
}

impl<'c> CourseProblem<'c> {
    /// Creates a problem over an eligibility pool.
    ///
    /// # Errors
    ///
    /// [`EnrollError::UnknownCourse`] if a pool id is not in the catalog.
    pub fn new(pool: Vec<CourseId>, catalog: &'c Catalog, preferences: Preferences) -> Result<Self> {
        if let Some(unknown) = pool.iter().find(|id| !catalog.contains(id.as_str())) {
            return Err(EnrollError::UnknownCourse(unknown.clone()));
        }
        Ok(Self {
            catalog,
            pool,
            preferences,
            scoring: Scoring::default(),
            min_courses: 3,
            max_courses: 10,
        })
    }

    /// Sets the scoring weights.
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the range the per-individual course count is drawn from.
    pub fn with_course_range(mut self, min: usize, max: usize) -> Self {
        self.min_courses = min;
        self.max_courses = max.max(min);
        self
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn pool(&self) -> &[CourseId] {
        &self.pool
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Draws a random schedule.
    ///
    /// Draws `k` uniformly from `[min_courses, max_courses]`, clips it to the
    /// pool size, samples `k` distinct pool courses, and assigns each a
    /// uniformly random section. Courses with no sections are skipped, so
    /// the result may be shorter than `k` (or empty).
    pub fn random_chromosome<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let k = rng
            .random_range(self.min_courses..=self.max_courses)
            .min(self.pool.len());

        index::sample(rng, self.pool.len(), k)
            .into_iter()
            .filter_map(|i| {
                let id = &self.pool[i];
                let sections = self.catalog.get(id.as_str())?.sections().len();
                (sections > 0).then(|| Gene::new(id.clone(), rng.random_range(0..sections)))
            })
            .collect()
    }

    /// Builds an initial generation of `size` random schedules.
    pub fn populate<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Chromosome> {
        (0..size).map(|_| self.random_chromosome(rng)).collect()
    }
}

impl GaProblem for CourseProblem<'_> {
    type Individual = Chromosome;
    type Fitness = i64;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        self.random_chromosome(rng)
    }

    fn evaluate(&self, individual: &Chromosome) -> Result<i64> {
        fitness::evaluate(individual, self.catalog, &self.preferences, &self.scoring)
    }

    /// Only a sentinel score needs the hard-constraint recheck; any other
    /// score came from a schedule that passed it.
    fn is_feasible(&self, individual: &Chromosome, score: i64) -> bool {
        score != fitness::INFEASIBLE || fitness::is_feasible(individual, self.catalog).unwrap_or(false)
    }

    fn crossover<R: Rng>(&self, parent1: &Chromosome, parent2: &Chromosome, rng: &mut R) -> (Chromosome, Chromosome) {
        chromosome::crossover(parent1, parent2, rng)
    }

    /// Section reroll: one gene whose course offers several sections is
    /// reassigned a different section, chosen uniformly.
    fn mutate<R: Rng>(&self, individual: &Chromosome, rng: &mut R) -> Chromosome {
        let candidates: Vec<(usize, usize)> = individual
            .genes()
            .iter()
            .enumerate()
            .filter_map(|(i, g)| {
                let sections = self.catalog.get(g.course.as_str())?.sections().len();
                (sections > 1).then_some((i, sections))
            })
            .collect();

        let Some(&(idx, sections)) = candidates.choose(rng) else {
            return individual.clone();
        };
        let current = individual.genes()[idx].section;
        let mut next = rng.random_range(0..sections - 1);
        if next >= current {
            next += 1;
        }
        individual.with_section(idx, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Course, Section, TimeWindow};
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn section(number: u32, days: &str, start: &str, end: &str) -> Section {
        Section::new(number, "lecture")
            .meeting(days.parse().unwrap(), TimeWindow::parse(start, end).unwrap())
    }

    fn catalog() -> Catalog {
        let mut courses: Vec<Course> = (0..12)
            .map(|i| {
                Course::new(format!("C{i:02}"), 3).with_sections([
                    section(1, "MW", "08:00", "09:00"),
                    section(2, "TR", "10:00", "11:00"),
                    section(3, "F", "12:00", "13:00"),
                ])
            })
            .collect();
        courses.push(Course::new("EMPTY", 3));
        courses.into_iter().collect()
    }

    #[test]
    fn test_unknown_pool_course() {
        let catalog = catalog();
        let err = CourseProblem::new(vec!["GHOST1".into()], &catalog, Preferences::default()).unwrap_err();
        assert_eq!(err, EnrollError::UnknownCourse("GHOST1".into()));
    }

    #[test]
    fn test_populate_respects_bounds() {
        let catalog = catalog();
        let problem = CourseProblem::new(catalog.eligible_pool(), &catalog, Preferences::default())
            .unwrap()
            .with_course_range(3, 10);
        let mut rng = create_rng(42);
        let population = problem.populate(100, &mut rng);
        assert_eq!(population.len(), 100);
        for c in &population {
            // EMPTY may be drawn and skipped, so the lower bound drops by one.
            assert!((2..=10).contains(&c.len()), "len {}", c.len());
            assert!(!c.contains("EMPTY"));
            let unique: HashSet<_> = c.course_ids().collect();
            assert_eq!(unique.len(), c.len());
            for g in c.genes() {
                assert!(g.section < 3);
            }
        }
    }

    #[test]
    fn test_populate_clips_to_pool() {
        let catalog = catalog();
        let pool = vec![CourseId::from("C00"), CourseId::from("C01")];
        let problem = CourseProblem::new(pool, &catalog, Preferences::default()).unwrap();
        let mut rng = create_rng(42);
        for c in problem.populate(20, &mut rng) {
            assert_eq!(c.len(), 2);
        }
    }

    #[test]
    fn test_populate_empty_pool() {
        let catalog = catalog();
        let problem = CourseProblem::new(Vec::new(), &catalog, Preferences::default()).unwrap();
        let mut rng = create_rng(42);
        let population = problem.populate(10, &mut rng);
        assert_eq!(population.len(), 10);
        assert!(population.iter().all(Chromosome::is_empty));
        assert_eq!(problem.evaluate(&population[0]).unwrap(), 0);
    }

    #[test]
    fn test_populate_only_sectionless_courses() {
        let catalog = catalog();
        let problem = CourseProblem::new(vec!["EMPTY".into()], &catalog, Preferences::default()).unwrap();
        let mut rng = create_rng(42);
        assert!(problem.populate(5, &mut rng).iter().all(Chromosome::is_empty));
    }

    #[test]
    fn test_mutate_changes_one_section() {
        let catalog = catalog();
        let problem = CourseProblem::new(catalog.eligible_pool(), &catalog, Preferences::default()).unwrap();
        let mut rng = create_rng(42);
        let original = problem.random_chromosome(&mut rng);
        for _ in 0..50 {
            let mutated = problem.mutate(&original, &mut rng);
            assert_eq!(mutated.len(), original.len());
            let changed = original
                .genes()
                .iter()
                .zip(mutated.genes())
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(changed, 1);
            assert!(original.course_ids().eq(mutated.course_ids()));
        }
    }

    #[test]
    fn test_feasibility_hook() {
        let catalog: Catalog = [
            Course::new("A100", 3).with_sections([section(1, "MW", "09:00", "10:00")]),
            Course::new("B100", 3).with_sections([section(1, "MW", "09:30", "10:30")]),
            Course::new("C100", 3).with_sections([section(1, "F", "09:00", "10:00")]),
        ]
        .into_iter()
        .collect();
        let problem = CourseProblem::new(catalog.eligible_pool(), &catalog, Preferences::default().with_credit(15))
            .unwrap();

        let clash: Chromosome = [Gene::new("A100", 0), Gene::new("B100", 0)].into_iter().collect();
        let clean: Chromosome = [Gene::new("A100", 0), Gene::new("C100", 0)].into_iter().collect();
        let clash_score = problem.evaluate(&clash).unwrap();
        let clean_score = problem.evaluate(&clean).unwrap();
        assert_eq!(clash_score, fitness::INFEASIBLE);
        assert!(clean_score < clash_score);
        assert!(!problem.is_feasible(&clash, clash_score));
        assert!(problem.is_feasible(&clean, clean_score));
        assert!(problem.is_feasible(&Chromosome::empty(), 0));
    }

    #[test]
    fn test_mutate_single_section_is_identity() {
        let catalog: Catalog = [Course::new("ONLY", 3).with_sections([Section::new(1, "online")])]
            .into_iter()
            .collect();
        let problem = CourseProblem::new(catalog.eligible_pool(), &catalog, Preferences::default()).unwrap();
        let mut rng = create_rng(42);
        let c = problem.random_chromosome(&mut rng);
        assert_eq!(problem.mutate(&c, &mut rng), c);
    }
}
