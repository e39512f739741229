//! Student roster demonstration
//!
//! Grades are computed by a `Func`, students are printed by an `Action`,
//! and pass/city filtering is driven by `Predicate`s.

use crate::config::{AppConfig, GradingConfig, OutputFormat};
use crate::sinks::{emit, LineSink};
use anyhow::{Context, Result};
use callback_registry::{Action, Callable, FilterExt, Func, Predicate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub marks: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Student {
    pub fn new(id: u32, name: &str, marks: i32, city: Option<&str>) -> Self {
        Self {
            id,
            name: name.to_string(),
            marks,
            city: city.map(str::to_string),
        }
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id:{} Name:{} Marks:{}", self.id, self.name, self.marks)?;
        if let Some(city) = &self.city {
            write!(f, " City:{}", city)?;
        }
        Ok(())
    }
}

/// Roster used when the config file does not list students
pub fn default_roster() -> Vec<Student> {
    vec![
        Student::new(1, "Aryan", 85, Some("Ahmedabad")),
        Student::new(2, "Katik", 45, Some("Surat")),
        Student::new(3, "Priya", 72, Some("Ahmedabad")),
        Student::new(4, "Karan", 30, Some("Baroda")),
    ]
}

pub fn grade_func(grading: &GradingConfig) -> Func<i32, &'static str> {
    let (a, b) = (grading.a_threshold, grading.b_threshold);
    Callable::new(move |marks: i32| {
        if marks >= a {
            "A"
        } else if marks >= b {
            "B"
        } else {
            "Fail"
        }
    })
}

pub fn pass_predicate<'a>(pass_mark: i32) -> Predicate<&'a Student> {
    Callable::new(move |s: &Student| s.marks >= pass_mark)
}

pub fn city_predicate<'a>(city: &str) -> Predicate<&'a Student> {
    let city = city.to_string();
    Callable::new(move |s: &Student| s.city.as_deref() == Some(city.as_str()))
}

pub fn print_action<'a>(console: Arc<dyn LineSink>) -> Action<&'a Student> {
    Callable::new(move |s: &Student| emit(console.as_ref(), &s.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeEntry {
    pub name: String,
    pub marks: i32,
    pub grade: String,
}

/// Everything the demonstration computes, independent of presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentReport {
    pub grades: Vec<GradeEntry>,
    pub passed: Vec<String>,
    pub city: String,
    pub city_grades: Vec<GradeEntry>,
    /// `add(10, 20)`
    pub sum: i32,
    /// `bonus(80)`
    pub bonus: i32,
}

pub fn build_report(config: &AppConfig) -> StudentReport {
    let students = &config.students;
    let grade = grade_func(&config.grading);
    let entry = |s: &Student| GradeEntry {
        name: s.name.clone(),
        marks: s.marks,
        grade: grade.call(s.marks).to_string(),
    };

    let is_passed = pass_predicate(config.grading.pass_mark);
    let in_city = city_predicate(&config.grading.city);

    let add: Func<(i32, i32), i32> = Callable::new(|(a, b): (i32, i32)| a + b);
    let bonus_marks = config.grading.bonus;
    let bonus: Func<i32, i32> = Callable::new(move |m: i32| m + bonus_marks);

    StudentReport {
        grades: students.iter().map(entry).collect(),
        passed: students
            .filter_by(&is_passed)
            .into_iter()
            .map(|s| s.name.clone())
            .collect(),
        city: config.grading.city.clone(),
        city_grades: students.filter_by(&in_city).into_iter().map(entry).collect(),
        sum: add.call((10, 20)),
        bonus: bonus.call(80),
    }
}

/// Run the demonstration, writing in the configured format
pub fn run(config: &AppConfig, format: OutputFormat, console: Arc<dyn LineSink>) -> Result<StudentReport> {
    let report = build_report(config);
    log::debug!(
        "Report built: {} student(s), {} passed",
        report.grades.len(),
        report.passed.len()
    );

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            console.write_line(&json)?;
        }
        OutputFormat::Txt => write_txt(config, &report, console)?,
    }

    Ok(report)
}

fn write_txt(config: &AppConfig, report: &StudentReport, console: Arc<dyn LineSink>) -> Result<()> {
    let print_student = print_action(Arc::clone(&console));
    let out = console.as_ref();

    out.write_line("=== FUNC Example (Grade Calculation) ===")?;
    for g in &report.grades {
        out.write_line(&format!("{} Grade: {}", g.name, g.grade))?;
    }

    out.write_line("")?;
    out.write_line("=== ACTION Example (Print Students) ===")?;
    config.students.apply_each(&print_student);

    out.write_line("")?;
    out.write_line("=== PREDICATE Example (Passed Students) ===")?;
    for name in &report.passed {
        out.write_line(&format!("{} Passed", name))?;
    }

    out.write_line("")?;
    out.write_line(&format!("=== REAL COMBINATION ({}) ===", report.city))?;
    let in_city = city_predicate(&report.city);
    for (student, g) in config.students.filter_by(&in_city).into_iter().zip(&report.city_grades) {
        print_student.call(student);
        out.write_line(&format!("Grade: {}", g.grade))?;
        out.write_line("")?;
    }

    out.write_line("=== FUNC with several parameters ===")?;
    out.write_line(&format!("Sum using Func: {}", report.sum))?;
    out.write_line(&format!("Bonus marks added: {}", report.bonus))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::MemorySink;

    #[test]
    fn test_grade_thresholds() {
        let grade = grade_func(&GradingConfig::default());
        assert_eq!(grade.call(85), "A");
        assert_eq!(grade.call(70), "A");
        assert_eq!(grade.call(69), "B");
        assert_eq!(grade.call(50), "B");
        assert_eq!(grade.call(49), "Fail");

        let strict = GradingConfig {
            a_threshold: 75,
            ..GradingConfig::default()
        };
        assert_eq!(grade_func(&strict).call(72), "B");
    }

    #[test]
    fn test_default_report() {
        let report = build_report(&AppConfig::default());

        let grades: Vec<_> = report.grades.iter().map(|g| g.grade.as_str()).collect();
        assert_eq!(grades, vec!["A", "Fail", "A", "Fail"]);
        assert_eq!(report.passed, vec!["Aryan", "Priya"]);

        let city: Vec<_> = report.city_grades.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(city, vec!["Aryan", "Priya"]);
        assert_eq!(report.sum, 30);
        assert_eq!(report.bonus, 85);
    }

    #[test]
    fn test_students_without_city() {
        let mut config = AppConfig::default();
        config.students = vec![Student::new(1, "Rahul", 40, None)];

        let report = build_report(&config);
        assert!(report.city_grades.is_empty());
        assert!(report.passed.is_empty());
        assert_eq!(config.students[0].to_string(), "Id:1 Name:Rahul Marks:40");
    }

    #[test]
    fn test_txt_output() {
        let sink = Arc::new(MemorySink::new());
        run(&AppConfig::default(), OutputFormat::Txt, sink.clone()).unwrap();

        let lines = sink.lines();
        assert_eq!(lines[0], "=== FUNC Example (Grade Calculation) ===");
        assert_eq!(lines[1], "Aryan Grade: A");
        assert!(lines.contains(&"Id:2 Name:Katik Marks:45 City:Surat".to_string()));
        assert!(lines.contains(&"Priya Passed".to_string()));
        assert!(!lines.contains(&"Katik Passed".to_string()));
        assert_eq!(lines.last().unwrap(), "Bonus marks added: 85");
    }

    #[test]
    fn test_json_output() {
        let sink = Arc::new(MemorySink::new());
        run(&AppConfig::default(), OutputFormat::Json, sink.clone()).unwrap();

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["passed"], serde_json::json!(["Aryan", "Priya"]));
        assert_eq!(value["sum"], 30);
    }
}
