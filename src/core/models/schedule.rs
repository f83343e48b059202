//! Schedule model: courses partitioned into backlog and semester buckets

use crate::core::models::Course;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A named container for courses: the backlog or one semester slot
///
/// Ordering puts `Backlog` before every semester, and semesters in number order,
/// so iterating a `BTreeMap<Bucket, _>` walks the roadmap front to back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    /// Courses without a confident semester placement
    Backlog,
    /// A 1-indexed semester slot
    Semester(u8),
}

impl Bucket {
    /// Position used for ordering checks: `-1` for backlog, `N` for semester N
    #[must_use]
    pub fn index(self) -> i32 {
        match self {
            Self::Backlog => -1,
            Self::Semester(n) => i32::from(n),
        }
    }

    /// Persisted semester number: `0` for backlog, `N` for semester N
    #[must_use]
    pub const fn semester_number(self) -> u8 {
        match self {
            Self::Backlog => 0,
            Self::Semester(n) => n,
        }
    }

    /// Inverse of [`semester_number`](Self::semester_number)
    #[must_use]
    pub const fn from_semester_number(number: u8) -> Self {
        if number == 0 {
            Self::Backlog
        } else {
            Self::Semester(number)
        }
    }

    /// Whether this bucket is a semester slot
    #[must_use]
    pub const fn is_semester(self) -> bool {
        matches!(self, Self::Semester(_))
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backlog => write!(f, "backlog"),
            Self::Semester(n) => write!(f, "semester-{n}"),
        }
    }
}

impl FromStr for Bucket {
    type Err = String;

    /// Accepts `backlog`, `semester-N` with N >= 1, or a bare semester number (`0` is backlog)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered == "backlog" {
            return Ok(Self::Backlog);
        }
        let unknown = || format!("Unknown bucket: '{s}'");
        match lowered.strip_prefix("semester-") {
            Some(digits) => match digits.parse::<u8>() {
                Ok(0) | Err(_) => Err(unknown()),
                Ok(n) => Ok(Self::Semester(n)),
            },
            None => lowered
                .parse::<u8>()
                .map(Self::from_semester_number)
                .map_err(|_| unknown()),
        }
    }
}

/// Errors raised when editing or restoring a schedule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The course is not present in the bucket it was moved from
    #[error("course {code} is not in {bucket}")]
    CourseNotInBucket {
        /// Course code
        code: String,
        /// Bucket the move named as its source
        bucket: Bucket,
    },
    /// The course is not on the roadmap at all
    #[error("course {0} is not on the roadmap")]
    UnknownCourse(String),
    /// A semester past the planning horizon was named
    #[error("semester {semester} is outside the {horizon}-semester horizon")]
    SemesterOutOfRange {
        /// Requested semester number
        semester: u8,
        /// Number of semesters in the plan
        horizon: u8,
    },
}

/// Semester-by-semester roadmap
///
/// Every course lives in exactly one bucket. Buckets for the backlog and every
/// semester up to the horizon always exist, even when empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    horizon: u8,
    buckets: BTreeMap<Bucket, Vec<Course>>,
    cycle_affected: Vec<String>,
    dirty: bool,
}

impl Schedule {
    /// Create an empty schedule with `horizon` semester buckets
    #[must_use]
    pub fn new(horizon: u8) -> Self {
        let mut buckets = BTreeMap::new();
        buckets.insert(Bucket::Backlog, Vec::new());
        for n in 1..=horizon {
            buckets.insert(Bucket::Semester(n), Vec::new());
        }
        Self {
            horizon,
            buckets,
            cycle_affected: Vec::new(),
            dirty: false,
        }
    }

    /// Number of semester buckets
    #[must_use]
    pub const fn horizon(&self) -> u8 {
        self.horizon
    }

    /// Whether a bucket exists in this schedule
    #[must_use]
    pub const fn contains_bucket(&self, bucket: Bucket) -> bool {
        match bucket {
            Bucket::Backlog => true,
            Bucket::Semester(n) => n >= 1 && n <= self.horizon,
        }
    }

    /// Append a course to a bucket without any checks
    pub(crate) fn push(&mut self, bucket: Bucket, course: Course) {
        self.buckets.entry(bucket).or_default().push(course);
    }

    /// Record courses that were forced into backlog because of a prerequisite cycle
    pub(crate) fn set_cycle_affected(&mut self, codes: Vec<String>) {
        self.cycle_affected = codes;
    }

    /// Courses in a bucket, in placement order
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[Course] {
        self.buckets.get(&bucket).map_or(&[], Vec::as_slice)
    }

    /// Iterate buckets front to back (backlog first)
    pub fn buckets(&self) -> impl Iterator<Item = (Bucket, &[Course])> {
        self.buckets.iter().map(|(b, c)| (*b, c.as_slice()))
    }

    /// Iterate every course with the bucket it sits in
    pub fn placements(&self) -> impl Iterator<Item = (Bucket, &Course)> {
        self.buckets
            .iter()
            .flat_map(|(b, courses)| courses.iter().map(move |c| (*b, c)))
    }

    /// Bucket currently holding a course
    #[must_use]
    pub fn bucket_of(&self, code: &str) -> Option<Bucket> {
        self.placements()
            .find(|(_, c)| c.code == code)
            .map(|(b, _)| b)
    }

    /// Total credits placed in a bucket
    #[must_use]
    pub fn bucket_credits(&self, bucket: Bucket) -> u32 {
        self.bucket(bucket)
            .iter()
            .fold(0u32, |total, c| total.saturating_add(c.credits))
    }

    /// Total credits across all buckets
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.placements()
            .fold(0, |total: u32, (_, c)| total.saturating_add(c.credits))
    }

    /// Number of courses across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether the schedule holds no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of semesters holding at least one course
    #[must_use]
    pub fn semesters_used(&self) -> usize {
        self.buckets
            .iter()
            .filter(|(b, c)| b.is_semester() && !c.is_empty())
            .count()
    }

    /// Codes of courses the scheduler could not order because of a prerequisite cycle
    #[must_use]
    pub fn cycle_affected(&self) -> &[String] {
        &self.cycle_affected
    }

    /// Whether the schedule has manual edits that have not been saved
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the unsaved-changes flag after the plan has been persisted
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Move a course from one bucket to another
    ///
    /// The course is appended to the end of `to`. No prerequisite or credit
    /// checks happen here; run [`validate`](crate::core::validate) to find
    /// ordering problems. Marks the schedule dirty.
    ///
    /// # Errors
    /// Returns an error if `to` is past the horizon or the course is not in `from`.
    pub fn move_course(&mut self, code: &str, from: Bucket, to: Bucket) -> Result<(), ScheduleError> {
        if !self.contains_bucket(to) {
            return Err(ScheduleError::SemesterOutOfRange {
                semester: to.semester_number(),
                horizon: self.horizon,
            });
        }

        let source = self.buckets.get_mut(&from);
        let position = source
            .as_ref()
            .and_then(|courses| courses.iter().position(|c| c.code == code));
        let (Some(courses), Some(pos)) = (source, position) else {
            return Err(ScheduleError::CourseNotInBucket {
                code: code.to_string(),
                bucket: from,
            });
        };

        let course = courses.remove(pos);
        self.push(to, course);
        self.dirty = true;
        Ok(())
    }

    /// Move a course to `to` from wherever it currently sits
    ///
    /// # Errors
    /// Returns an error if the course is not on the roadmap or `to` is past the horizon.
    pub fn move_to(&mut self, code: &str, to: Bucket) -> Result<Bucket, ScheduleError> {
        let from = self
            .bucket_of(code)
            .ok_or_else(|| ScheduleError::UnknownCourse(code.to_string()))?;
        self.move_course(code, from, to)?;
        Ok(from)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Roadmap ({} courses, {} credits, {} of {} semesters used):",
            self.len(),
            self.total_credits(),
            self.semesters_used(),
            self.horizon
        )?;

        for (bucket, courses) in self.buckets() {
            if courses.is_empty() {
                continue;
            }
            let label = match bucket {
                Bucket::Backlog => "Backlog".to_string(),
                Bucket::Semester(n) => format!("Semester {n}"),
            };
            writeln!(f)?;
            writeln!(f, "{label} ({} credits)", self.bucket_credits(bucket))?;
            for course in courses {
                if course.name.is_empty() {
                    writeln!(f, "  {} ({} cr)", course.code, course.credits)?;
                } else {
                    writeln!(f, "  {} {} ({} cr)", course.code, course.name, course.credits)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, credits: u32) -> Course {
        Course::new(code.to_string(), String::new(), credits)
    }

    fn sample() -> Schedule {
        let mut schedule = Schedule::new(8);
        schedule.push(Bucket::Semester(1), course("A", 3));
        schedule.push(Bucket::Semester(2), course("B", 4));
        schedule.push(Bucket::Semester(2), course("C", 3));
        schedule
    }

    #[test]
    fn test_bucket_ordering() {
        assert!(Bucket::Backlog < Bucket::Semester(1));
        assert!(Bucket::Semester(1) < Bucket::Semester(8));
        assert_eq!(Bucket::Backlog.index(), -1);
        assert_eq!(Bucket::Semester(3).index(), 3);
    }

    #[test]
    fn test_bucket_display_and_parse() {
        assert_eq!(Bucket::Backlog.to_string(), "backlog");
        assert_eq!(Bucket::Semester(4).to_string(), "semester-4");
        assert_eq!("semester-4".parse::<Bucket>(), Ok(Bucket::Semester(4)));
        assert_eq!("Backlog".parse::<Bucket>(), Ok(Bucket::Backlog));
        assert_eq!("2".parse::<Bucket>(), Ok(Bucket::Semester(2)));
        assert_eq!("0".parse::<Bucket>(), Ok(Bucket::Backlog));
        assert!("fall".parse::<Bucket>().is_err());
    }

    #[test]
    fn test_semester_zero_is_not_a_semester_name() {
        assert!("semester-0".parse::<Bucket>().is_err());
        assert!("Semester-0".parse::<Bucket>().is_err());
        assert!("semester-".parse::<Bucket>().is_err());
        assert_eq!("0".parse::<Bucket>(), Ok(Bucket::Backlog));
    }

    #[test]
    fn test_semester_number_round_trip() {
        assert_eq!(Bucket::Backlog.semester_number(), 0);
        assert_eq!(Bucket::from_semester_number(0), Bucket::Backlog);
        assert_eq!(Bucket::from_semester_number(7), Bucket::Semester(7));
    }

    #[test]
    fn test_new_schedule_has_all_buckets() {
        let schedule = Schedule::new(8);
        assert_eq!(schedule.buckets().count(), 9);
        assert!(schedule.is_empty());
        assert!(!schedule.is_dirty());
        assert_eq!(schedule.semesters_used(), 0);
    }

    #[test]
    fn test_lookup_and_credits() {
        let schedule = sample();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.bucket_of("B"), Some(Bucket::Semester(2)));
        assert_eq!(schedule.bucket_of("Z"), None);
        assert_eq!(schedule.bucket_credits(Bucket::Semester(2)), 7);
        assert_eq!(schedule.total_credits(), 10);
        assert_eq!(schedule.semesters_used(), 2);
    }

    #[test]
    fn test_move_course_marks_dirty() {
        let mut schedule = sample();
        schedule
            .move_course("B", Bucket::Semester(2), Bucket::Semester(1))
            .unwrap();

        assert!(schedule.is_dirty());
        let codes: Vec<&str> = schedule
            .bucket(Bucket::Semester(1))
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert_eq!(schedule.bucket(Bucket::Semester(2)).len(), 1);

        schedule.mark_saved();
        assert!(!schedule.is_dirty());
    }

    #[test]
    fn test_move_ignores_credit_cap() {
        let mut schedule = Schedule::new(8);
        schedule.push(Bucket::Semester(1), course("BIG", 20));
        schedule.push(Bucket::Backlog, course("HUGE", 20));
        schedule
            .move_course("HUGE", Bucket::Backlog, Bucket::Semester(1))
            .unwrap();
        assert_eq!(schedule.bucket_credits(Bucket::Semester(1)), 40);
    }

    #[test]
    fn test_credit_totals_saturate() {
        let mut schedule = Schedule::new(8);
        schedule.push(Bucket::Semester(1), course("A", 4_000_000_000));
        schedule.push(Bucket::Semester(1), course("B", 1_000_000_000));
        schedule.push(Bucket::Backlog, course("C", 3));

        assert_eq!(schedule.bucket_credits(Bucket::Semester(1)), u32::MAX);
        assert_eq!(schedule.total_credits(), u32::MAX);
    }

    #[test]
    fn test_move_from_wrong_bucket() {
        let mut schedule = sample();
        let err = schedule
            .move_course("A", Bucket::Semester(2), Bucket::Semester(3))
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::CourseNotInBucket {
                code: "A".to_string(),
                bucket: Bucket::Semester(2),
            }
        );
        assert!(!schedule.is_dirty());
        assert_eq!(schedule.bucket_of("A"), Some(Bucket::Semester(1)));
    }

    #[test]
    fn test_move_past_horizon() {
        let mut schedule = sample();
        let err = schedule
            .move_course("A", Bucket::Semester(1), Bucket::Semester(9))
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::SemesterOutOfRange {
                semester: 9,
                horizon: 8
            }
        );
    }

    #[test]
    fn test_move_to_finds_source() {
        let mut schedule = sample();
        let from = schedule.move_to("C", Bucket::Backlog).unwrap();
        assert_eq!(from, Bucket::Semester(2));
        assert_eq!(schedule.bucket_of("C"), Some(Bucket::Backlog));

        assert_eq!(
            schedule.move_to("Q", Bucket::Backlog),
            Err(ScheduleError::UnknownCourse("Q".to_string()))
        );
    }

    #[test]
    fn test_display_lists_non_empty_buckets() {
        let display = sample().to_string();
        assert!(display.contains("Semester 1 (3 credits)"));
        assert!(display.contains("Semester 2 (7 credits)"));
        assert!(!display.contains("Semester 3"));
        assert!(!display.contains("Backlog"));
    }
}
