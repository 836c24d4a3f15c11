//! Synthetic CSV datasets for the exploratory analysis exercises.
//!
//! Every dataset is drawn from one seeded generator in a fixed order, so a
//! given seed always reproduces the same files.

use crate::stats::{self, tidy};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use deck_core::{Error, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand_distr::{Beta, Gamma, Poisson};
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Seed used by the exercise datasets unless another is given.
pub const DEFAULT_SEED: u64 = 42;

/// What was written for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub path: PathBuf,
    pub rows: usize,
    /// One-line description of the data, for the CLI summary.
    pub note: String,
}

#[derive(Debug, Serialize)]
struct StudentScore {
    student_id: usize,
    exam_score: f64,
}

#[derive(Debug, Serialize)]
struct Employee {
    employee_id: usize,
    department: &'static str,
    salary: f64,
    years_experience: f64,
}

#[derive(Debug, Serialize)]
struct House {
    house_id: usize,
    sqft: i64,
    price: i64,
}

#[derive(Debug, Serialize)]
struct Transaction {
    transaction_id: usize,
    amount: f64,
    date: String,
    category: &'static str,
    customer_type: &'static str,
}

#[derive(Debug, Serialize)]
struct Property {
    price: i64,
    sqft: i64,
    bedrooms: i64,
    bathrooms: f64,
    age: i64,
    lot_size: f64,
    garage_spaces: u8,
    distance_to_city: f64,
    crime_rate: f64,
    school_rating: f64,
    condition_score: f64,
    /// Zero when never renovated.
    renovation_year: i32,
}

#[derive(Debug, Serialize)]
struct DailySales {
    date: String,
    daily_sales: f64,
    day_of_week: String,
    is_holiday: bool,
}

#[derive(Debug, Serialize)]
struct Order {
    transaction_id: usize,
    customer_segment: &'static str,
    product_category: &'static str,
    region: &'static str,
    order_value: f64,
    quantity: u32,
    date: String,
    customer_age: i64,
    is_repeat_customer: bool,
}

#[derive(Debug, Serialize)]
struct Applicant {
    applicant_id: usize,
    age: i64,
    income: Option<f64>,
    employment_length: Option<f64>,
    debt: f64,
    credit_score: i64,
    loan_amount: i64,
    interest_rate: f64,
    term: u32,
    purpose: &'static str,
    grade: &'static str,
    delinquencies: Option<u32>,
    inquiries: u32,
    open_accounts: u32,
    default: u8,
}

/// Write every exercise dataset into `out_dir`.
pub fn generate_all(out_dir: impl AsRef<Path>, seed: u64) -> Result<Vec<DatasetSummary>> {
    let out_dir = out_dir.as_ref();
    std::fs::create_dir_all(out_dir)?;
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut summaries = Vec::new();

    let scores = student_scores(&mut rng, 200)?;
    let mean = stats::mean(&scores.iter().map(|s| s.exam_score).collect::<Vec<_>>());
    summaries.push(write_rows(
        out_dir.join("student_scores.csv"),
        &scores,
        format!("{} students, mean={:.1}", scores.len(), mean),
    )?);

    let employees = employee_salaries(&mut rng, 500)?;
    summaries.push(write_rows(
        out_dir.join("employee_salaries.csv"),
        &employees,
        format!("{} employees across {} departments", employees.len(), DEPARTMENTS.len()),
    )?);

    let houses = house_simple(&mut rng, 300)?;
    let r = stats::pearson(
        &houses.iter().map(|h| h.sqft as f64).collect::<Vec<_>>(),
        &houses.iter().map(|h| h.price as f64).collect::<Vec<_>>(),
    );
    summaries.push(write_rows(
        out_dir.join("house_simple.csv"),
        &houses,
        format!("{} houses, correlation={:.3}", houses.len(), r),
    )?);

    let transactions = customer_transactions(&mut rng, 10_000)?;
    summaries.push(write_rows(
        out_dir.join("customer_transactions.csv"),
        &transactions,
        format!("{} transactions, right-skewed amounts", transactions.len()),
    )?);

    let properties = real_estate(&mut rng, 1000)?;
    summaries.push(write_rows(
        out_dir.join("real_estate.csv"),
        &properties,
        format!("{} properties with 12 features", properties.len()),
    )?);

    let sales = daily_sales(&mut rng, 730)?;
    let holidays = sales.iter().filter(|d| d.is_holiday).count();
    summaries.push(write_rows(
        out_dir.join("daily_sales.csv"),
        &sales,
        format!("{} days with seasonal patterns and {} holidays", sales.len(), holidays),
    )?);

    let survey = customer_survey(&mut rng, 5000)?;
    summaries.push(survey.write(out_dir.join("customer_survey.csv"))?);

    let orders = ecommerce_full(&mut rng, 50_000)?;
    summaries.push(write_rows(
        out_dir.join("ecommerce_full.csv"),
        &orders,
        format!("{} transactions with segment and regional data", orders.len()),
    )?);

    let applicants = credit_risk(&mut rng, 8000)?;
    let defaults = applicants.iter().filter(|a| a.default == 1).count();
    summaries.push(write_rows(
        out_dir.join("credit_risk.csv"),
        &applicants,
        format!(
            "{} applicants, {:.1}% default rate",
            applicants.len(),
            defaults as f64 / applicants.len().max(1) as f64 * 100.0
        ),
    )?);

    for summary in &summaries {
        log::info!("Created {} ({} rows)", summary.path.display(), summary.rows);
    }
    Ok(summaries)
}

fn write_rows<T: Serialize>(path: PathBuf, rows: &[T], note: String) -> Result<DatasetSummary> {
    let mut writer = csv::Writer::from_path(&path)
        .map_err(|e| Error::CsvError(format!("Failed to create {}: {}", path.display(), e)))?;
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| Error::CsvError(format!("Failed to write {}: {}", path.display(), e)))?;
    }
    writer.flush()?;
    Ok(DatasetSummary {
        path,
        rows: rows.len(),
        note,
    })
}

fn weighted(weights: &[f64]) -> Result<WeightedIndex<f64>> {
    WeightedIndex::new(weights).map_err(|e| Error::ConfigError(format!("Invalid weights: {}", e)))
}

fn built<D, E: std::fmt::Display>(made: std::result::Result<D, E>, what: &str) -> Result<D> {
    made.map_err(|e| Error::ConfigError(format!("Invalid {} parameters: {}", what, e)))
}

fn student_scores(rng: &mut SmallRng, n: usize) -> Result<Vec<StudentScore>> {
    Ok(stats::normal(rng, 75.0, 12.0, n)?
        .into_iter()
        .enumerate()
        .map(|(i, score)| StudentScore {
            student_id: i + 1,
            exam_score: tidy(score, 40.0, 100.0, 1),
        })
        .collect())
}

/// Department name with its salary mean and standard deviation.
const DEPARTMENTS: [(&str, f64, f64); 4] = [
    ("Engineering", 90_000.0, 20_000.0),
    ("Sales", 75_000.0, 18_000.0),
    ("Marketing", 70_000.0, 15_000.0),
    ("HR", 65_000.0, 12_000.0),
];

fn employee_salaries(rng: &mut SmallRng, n: usize) -> Result<Vec<Employee>> {
    let per_department = n / DEPARTMENTS.len();
    let mut rows = Vec::with_capacity(n);
    for (department, mean, sd) in DEPARTMENTS {
        let salaries = stats::normal(rng, mean, sd, per_department)?;
        let years = stats::exponential(rng, 5.0, per_department)?;
        for (salary, years) in salaries.into_iter().zip(years) {
            rows.push(Employee {
                employee_id: rows.len() + 1,
                department,
                salary: tidy(salary, 40_000.0, 200_000.0, 2),
                years_experience: tidy(years, 0.0, 30.0, 1),
            });
        }
    }
    Ok(rows)
}

fn house_simple(rng: &mut SmallRng, n: usize) -> Result<Vec<House>> {
    let sqft = stats::normal(rng, 2000.0, 600.0, n)?;
    let noise = stats::normal(rng, 0.0, 40_000.0, n)?;
    Ok(sqft
        .into_iter()
        .zip(noise)
        .enumerate()
        .map(|(i, (sqft, noise))| {
            let sqft = sqft.clamp(800.0, 5000.0);
            let price = (150_000.0 + sqft * 150.0 + noise).clamp(100_000.0, 1_500_000.0);
            House {
                house_id: i + 1,
                sqft: sqft.round() as i64,
                price: price.round() as i64,
            }
        })
        .collect())
}

const CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Home", "Books"];
const CUSTOMER_TYPES: [&str; 3] = ["New", "Regular", "Premium"];

fn customer_transactions(rng: &mut SmallRng, n: usize) -> Result<Vec<Transaction>> {
    let amounts = stats::lognormal(rng, 3.5, 1.2, n)?;
    let offsets = stats::uniform(rng, 0.0, 365.0, n);
    let types = weighted(&[0.3, 0.5, 0.2])?;
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .ok_or_else(|| Error::ConfigError("Invalid start date".to_string()))?;

    Ok(amounts
        .into_iter()
        .zip(offsets)
        .enumerate()
        .map(|(i, (amount, offset))| Transaction {
            transaction_id: i + 1,
            amount: (amount * 100.0).round() / 100.0,
            date: (start + Duration::days(offset as i64)).format("%Y-%m-%d").to_string(),
            category: CATEGORIES[rng.gen_range(0..CATEGORIES.len())],
            customer_type: CUSTOMER_TYPES[types.sample(rng)],
        })
        .collect())
}

fn real_estate(rng: &mut SmallRng, n: usize) -> Result<Vec<Property>> {
    let sqft: Vec<f64> = stats::normal(rng, 2200.0, 700.0, n)?
        .into_iter()
        .map(|v| v.clamp(800.0, 6000.0))
        .collect();
    let bedroom_noise = stats::normal(rng, 0.0, 0.5, n)?;
    let bedrooms: Vec<f64> = sqft
        .iter()
        .zip(&bedroom_noise)
        .map(|(s, e)| tidy(s / 500.0 + e, 1.0, 7.0, 0))
        .collect();
    let bathroom_noise = stats::normal(rng, 0.0, 0.3, n)?;
    let bathrooms: Vec<f64> = bedrooms
        .iter()
        .zip(&bathroom_noise)
        .map(|(b, e)| tidy(b * 0.75 + e, 1.0, 5.0, 1))
        .collect();
    let age: Vec<f64> = stats::exponential(rng, 15.0, n)?
        .into_iter()
        .map(|v| tidy(v, 0.0, 100.0, 0))
        .collect();
    let lot_dist = built(Gamma::new(3.0, 0.15), "gamma")?;
    let lot_size: Vec<f64> = (0..n).map(|_| tidy(lot_dist.sample(rng), 0.05, 2.0, 2)).collect();
    let garages = weighted(&[0.1, 0.3, 0.5, 0.1])?;
    let garage_spaces: Vec<u8> = (0..n).map(|_| garages.sample(rng) as u8).collect();
    let distance_dist = built(Gamma::new(2.0, 3.0), "gamma")?;
    let distance: Vec<f64> = (0..n).map(|_| tidy(distance_dist.sample(rng), 0.5, 50.0, 1)).collect();
    let crime_dist = built(Beta::new(2.0, 5.0), "beta")?;
    let crime: Vec<f64> = (0..n).map(|_| crime_dist.sample(rng) * 100.0).collect();
    let school: Vec<f64> = stats::normal(rng, 6.5, 1.5, n)?
        .into_iter()
        .map(|v| tidy(v, 1.0, 10.0, 1))
        .collect();
    let condition: Vec<f64> = stats::normal(rng, 7.0, 1.5, n)?
        .into_iter()
        .map(|v| tidy(v, 1.0, 10.0, 1))
        .collect();
    let renovated: Vec<i32> = (0..n)
        .map(|_| {
            let year = rng.gen_range(1990..2024);
            if rng.gen::<f64>() < 0.3 {
                year
            } else {
                0
            }
        })
        .collect();
    let noise = stats::normal(rng, 0.0, 30_000.0, n)?;

    Ok((0..n)
        .map(|i| {
            let price = 100_000.0 + sqft[i] * 120.0 + bedrooms[i] * 15_000.0 + bathrooms[i] * 10_000.0
                - age[i] * 1000.0
                + lot_size[i] * 50_000.0
                + f64::from(garage_spaces[i]) * 8000.0
                - distance[i] * 2000.0
                - crime[i] * 500.0
                + school[i] * 5000.0
                + condition[i] * 8000.0
                + noise[i];
            Property {
                price: price.clamp(80_000.0, 1_000_000.0).round() as i64,
                sqft: sqft[i].round() as i64,
                bedrooms: bedrooms[i] as i64,
                bathrooms: bathrooms[i],
                age: age[i] as i64,
                lot_size: lot_size[i],
                garage_spaces: garage_spaces[i],
                distance_to_city: distance[i],
                crime_rate: (crime[i] * 100.0).round() / 100.0,
                school_rating: school[i],
                condition_score: condition[i],
                renovation_year: renovated[i],
            }
        })
        .collect())
}

fn weekday_factor(day: Weekday) -> f64 {
    match day {
        Weekday::Mon => 0.95,
        Weekday::Tue => 0.98,
        Weekday::Wed => 1.0,
        Weekday::Thu => 1.02,
        Weekday::Fri => 1.15,
        Weekday::Sat => 1.25,
        Weekday::Sun => 0.85,
    }
}

fn daily_sales(rng: &mut SmallRng, days: usize) -> Result<Vec<DailySales>> {
    const HOLIDAYS: usize = 15;
    let start = NaiveDate::from_ymd_opt(2022, 1, 1)
        .ok_or_else(|| Error::ConfigError("Invalid start date".to_string()))?;
    let noise = stats::normal(rng, 0.0, 3000.0, days)?;

    let mut holiday = vec![false; days];
    for idx in index::sample(rng, days, HOLIDAYS.min(days)) {
        holiday[idx] = true;
    }

    let last = days.saturating_sub(1).max(1) as f64;
    Ok((0..days)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            let t = i as f64 / last;
            let trend = 50_000.0 + 10_000.0 * t;
            let seasonal = 5000.0 * (4.0 * std::f64::consts::PI * t).sin();
            let mut sales = (trend + seasonal + noise[i]) * weekday_factor(date.weekday());
            if holiday[i] {
                sales *= 1.3;
            }
            DailySales {
                date: date.format("%Y-%m-%d").to_string(),
                daily_sales: tidy(sales, 20_000.0, 100_000.0, 2),
                day_of_week: date.format("%A").to_string(),
                is_holiday: holiday[i],
            }
        })
        .collect())
}

const QUESTIONS: usize = 20;
/// Questions older respondents tend to skip.
const AGE_SKIPPED: [usize; 4] = [15, 16, 17, 18];
/// Questions with a small share of values lost at random.
const RANDOMLY_LOST: [usize; 2] = [5, 10];

/// Survey rows with missing cells as `None`.
#[derive(Debug, Clone)]
struct Survey {
    age: Vec<f64>,
    income: Vec<Option<f64>>,
    education: Vec<&'static str>,
    /// `answers[q][row]` for questions `q1..=q20`.
    answers: Vec<Vec<Option<u8>>>,
}

impl Survey {
    fn len(&self) -> usize {
        self.age.len()
    }

    fn missing_share(&self) -> f64 {
        let missing = self.income.iter().filter(|v| v.is_none()).count()
            + self.answers.iter().flatten().filter(|v| v.is_none()).count();
        let cells = self.len() * (4 + QUESTIONS);
        if cells == 0 {
            0.0
        } else {
            missing as f64 / cells as f64
        }
    }

    fn write(&self, path: PathBuf) -> Result<DatasetSummary> {
        let csv_err = |e: csv::Error| Error::CsvError(format!("Failed to write {}: {}", path.display(), e));
        let mut writer = csv::Writer::from_path(&path).map_err(csv_err)?;

        let mut header = vec!["respondent_id".to_string(), "age".into(), "income".into(), "education".into()];
        header.extend((1..=QUESTIONS).map(|q| format!("q{}", q)));
        writer.write_record(&header).map_err(csv_err)?;

        for row in 0..self.len() {
            let mut record = vec![
                (row + 1).to_string(),
                self.age[row].to_string(),
                self.income[row].map(|v| v.to_string()).unwrap_or_default(),
                self.education[row].to_string(),
            ];
            record.extend(
                self.answers
                    .iter()
                    .map(|column| column[row].map(|v| v.to_string()).unwrap_or_default()),
            );
            writer.write_record(&record).map_err(csv_err)?;
        }
        writer.flush()?;

        Ok(DatasetSummary {
            path: path.clone(),
            rows: self.len(),
            note: format!(
                "{} respondents, {:.1}% missing data (structured)",
                self.len(),
                self.missing_share() * 100.0
            ),
        })
    }
}

fn customer_survey(rng: &mut SmallRng, n: usize) -> Result<Survey> {
    let age: Vec<f64> = stats::normal(rng, 45.0, 15.0, n)?
        .into_iter()
        .map(|v| tidy(v, 18.0, 90.0, 0))
        .collect();
    let income: Vec<f64> = stats::lognormal(rng, 11.0, 0.6, n)?
        .into_iter()
        .map(|v| tidy(v, 20_000.0, 300_000.0, 0))
        .collect();

    let levels = ["High School", "Bachelor", "Master", "PhD"];
    let education_weights = weighted(&[0.3, 0.4, 0.25, 0.05])?;
    let education = (0..n).map(|_| levels[education_weights.sample(rng)]).collect();

    let answer_weights = weighted(&[0.05, 0.15, 0.4, 0.3, 0.1])?;
    let mut answers: Vec<Vec<Option<u8>>> = (0..QUESTIONS)
        .map(|_| {
            (0..n)
                .map(|_| Some(answer_weights.sample(rng) as u8 + 1))
                .collect()
        })
        .collect();

    // Lower incomes are reported less often.
    let income = income
        .into_iter()
        .map(|v| {
            let p_missing = 1.0 / (1.0 + ((v - 100_000.0) / 30_000.0).exp());
            (rng.gen::<f64>() >= p_missing).then_some(v)
        })
        .collect();

    for q in AGE_SKIPPED {
        for (row, a) in age.iter().enumerate() {
            if rng.gen::<f64>() < (a - 18.0) / 100.0 {
                answers[q - 1][row] = None;
            }
        }
    }
    for q in RANDOMLY_LOST {
        for row in 0..n {
            if rng.gen::<f64>() < 0.05 {
                answers[q - 1][row] = None;
            }
        }
    }

    Ok(Survey {
        age,
        income,
        education,
        answers,
    })
}

const SEGMENTS: [(&str, f64); 3] = [("New", 50.0), ("Regular", 100.0), ("Premium", 250.0)];
const PRODUCT_CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Home", "Books", "Sports"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];

fn ecommerce_full(rng: &mut SmallRng, n: usize) -> Result<Vec<Order>> {
    let segments = weighted(&[0.25, 0.55, 0.2])?;
    let quantity = built(Poisson::new(2.0), "poisson")?;
    let start = NaiveDate::from_ymd_opt(2023, 1, 1)
        .ok_or_else(|| Error::ConfigError("Invalid start date".to_string()))?;

    let mut orders = Vec::with_capacity(n);
    for i in 1..=n {
        let (segment, average) = SEGMENTS[segments.sample(rng)];
        let category = PRODUCT_CATEGORIES[rng.gen_range(0..PRODUCT_CATEGORIES.len())];
        let region = REGIONS[rng.gen_range(0..REGIONS.len())];
        let base = match category {
            "Electronics" => average * 2.5,
            "Home" => average * 1.5,
            _ => average,
        };
        let value = built(Gamma::new(2.0, base / 2.0), "gamma")?.sample(rng);
        let age = stats::normal(rng, 40.0, 12.0, 1)?.first().copied().unwrap_or(40.0);
        let offset = rng.gen_range(0.0..365.0) as i64;
        orders.push(Order {
            transaction_id: i,
            customer_segment: segment,
            product_category: category,
            region,
            order_value: (value * 100.0).round() / 100.0,
            quantity: quantity.sample(rng) as u32 + 1,
            date: (start + Duration::days(offset)).format("%Y-%m-%d").to_string(),
            customer_age: age as i64,
            is_repeat_customer: rng.gen::<f64>() < 0.7,
        });
    }
    Ok(orders)
}

const PURPOSES: [&str; 5] = ["debt_consolidation", "credit_card", "home", "car", "other"];

/// Letter grade for a credit score, bands closed on the right.
fn credit_grade(score: f64) -> &'static str {
    match score {
        s if s <= 600.0 => "D",
        s if s <= 650.0 => "C",
        s if s <= 700.0 => "B",
        s if s <= 750.0 => "A",
        _ => "AA",
    }
}

fn credit_risk(rng: &mut SmallRng, n: usize) -> Result<Vec<Applicant>> {
    let age = stats::normal(rng, 40.0, 12.0, n)?;
    let income: Vec<f64> = stats::lognormal(rng, 10.5, 0.7, n)?
        .into_iter()
        .map(|v| tidy(v, 15_000.0, 250_000.0, 0))
        .collect();
    let employment = stats::exponential(rng, 6.0, n)?;
    let debt_share = built(Beta::new(2.0, 5.0), "beta")?;
    let debt: Vec<f64> = income.iter().map(|inc| inc * debt_share.sample(rng)).collect();
    let score: Vec<f64> = stats::normal(rng, 680.0, 80.0, n)?
        .into_iter()
        .map(|v| tidy(v, 300.0, 850.0, 0))
        .collect();
    let loan = stats::lognormal(rng, 9.5, 0.8, n)?;
    let rate_noise = stats::normal(rng, 0.0, 2.0, n)?;
    let terms = weighted(&[0.6, 0.4])?;
    let purposes = weighted(&[0.3, 0.2, 0.15, 0.2, 0.15])?;
    let delinquency = built(Poisson::new(0.5), "poisson")?;
    let inquiry = built(Poisson::new(1.0), "poisson")?;
    let accounts = built(Poisson::new(5.0), "poisson")?;
    let risk_noise = stats::normal(rng, 0.0, 1.0, n)?;

    let mut applicants = Vec::with_capacity(n);
    for i in 0..n {
        let employment_length = tidy(employment[i], 0.0, 40.0, 1);
        let delinquencies = delinquency.sample(rng) as u32;
        let inquiries = inquiry.sample(rng) as u32;
        let logit = -5.0 + debt[i] / income[i] * 3.0 + (850.0 - score[i]) / 100.0 + f64::from(delinquencies) * 0.3
            + f64::from(inquiries) * 0.2
            - employment_length * 0.05
            + risk_noise[i];
        let p_default = 1.0 / (1.0 + (-logit).exp());
        applicants.push(Applicant {
            applicant_id: i + 1,
            age: tidy(age[i], 18.0, 75.0, 0) as i64,
            income: Some(income[i]),
            employment_length: Some(employment_length),
            debt: (debt[i] * 100.0).round() / 100.0,
            credit_score: score[i] as i64,
            loan_amount: tidy(loan[i], 1000.0, 100_000.0, 0) as i64,
            interest_rate: tidy(20.0 - (score[i] - 300.0) / 550.0 * 15.0 + rate_noise[i], 3.0, 25.0, 2),
            term: [36, 60][terms.sample(rng)],
            purpose: PURPOSES[purposes.sample(rng)],
            grade: credit_grade(score[i]),
            delinquencies: Some(delinquencies),
            inquiries,
            open_accounts: accounts.sample(rng) as u32 + 2,
            default: u8::from(rng.gen::<f64>() < p_default),
        });
    }

    // Some answers are lost at random after scoring.
    for applicant in applicants.iter_mut() {
        if rng.gen::<f64>() < 0.08 {
            applicant.income = None;
        }
        if rng.gen::<f64>() < 0.05 {
            applicant.employment_length = None;
        }
        if rng.gen::<f64>() < 0.03 {
            applicant.delinquencies = None;
        }
    }
    Ok(applicants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(DEFAULT_SEED)
    }

    #[test]
    fn test_student_scores_clipped() {
        let scores = student_scores(&mut rng(), 200).unwrap();
        assert_eq!(scores.len(), 200);
        assert!(scores.iter().all(|s| (40.0..=100.0).contains(&s.exam_score)));
        assert_eq!(scores[0].student_id, 1);
    }

    #[test]
    fn test_employees_split_by_department() {
        let rows = employee_salaries(&mut rng(), 500).unwrap();
        assert_eq!(rows.len(), 500);
        assert_eq!(rows.iter().filter(|r| r.department == "HR").count(), 125);
        assert_eq!(rows[499].employee_id, 500);
        assert!(rows.iter().all(|r| (0.0..=30.0).contains(&r.years_experience)));
    }

    #[test]
    fn test_house_price_correlates_with_size() {
        let rows = house_simple(&mut rng(), 300).unwrap();
        let sqft: Vec<f64> = rows.iter().map(|h| h.sqft as f64).collect();
        let price: Vec<f64> = rows.iter().map(|h| h.price as f64).collect();
        assert!(stats::pearson(&sqft, &price) > 0.8);
    }

    #[test]
    fn test_transactions_within_year() {
        let rows = customer_transactions(&mut rng(), 1000).unwrap();
        assert!(rows.iter().all(|t| t.date.starts_with("2023-")));
        assert!(rows.iter().all(|t| t.amount > 0.0));
        assert!(rows.iter().any(|t| t.customer_type == "Premium"));
    }

    #[test]
    fn test_daily_sales_calendar() {
        let rows = daily_sales(&mut rng(), 730).unwrap();
        assert_eq!(rows.len(), 730);
        assert_eq!(rows[0].date, "2022-01-01");
        assert_eq!(rows[0].day_of_week, "Saturday");
        assert_eq!(rows[729].date, "2023-12-31");
        assert_eq!(rows.iter().filter(|d| d.is_holiday).count(), 15);
        assert!(rows.iter().all(|d| (20_000.0..=100_000.0).contains(&d.daily_sales)));
    }

    #[test]
    fn test_survey_missingness_patterns() {
        let survey = customer_survey(&mut rng(), 2000).unwrap();
        assert_eq!(survey.len(), 2000);
        assert!(survey.income.iter().any(|v| v.is_none()));
        // untouched questions are complete
        assert!(survey.answers[0].iter().all(|v| v.is_some()));
        assert!(survey.answers[14].iter().any(|v| v.is_none()));
        assert!(survey.answers[4].iter().any(|v| v.is_none()));
        assert!(survey.answers[0].iter().flatten().all(|v| (1..=5).contains(v)));
    }

    #[test]
    fn test_generate_all_writes_nine_files() {
        let dir = TempDir::new().unwrap();
        let summaries = generate_all(dir.path(), DEFAULT_SEED).unwrap();
        let rows: Vec<usize> = summaries.iter().map(|s| s.rows).collect();
        assert_eq!(rows, vec![200, 500, 300, 10_000, 1000, 730, 5000, 50_000, 8000]);

        let expected = [
            (
                "real_estate.csv",
                "price,sqft,bedrooms,bathrooms,age,lot_size,garage_spaces,distance_to_city,crime_rate,school_rating,condition_score,renovation_year",
                1000,
            ),
            (
                "ecommerce_full.csv",
                "transaction_id,customer_segment,product_category,region,order_value,quantity,date,customer_age,is_repeat_customer",
                50_000,
            ),
            (
                "credit_risk.csv",
                "applicant_id,age,income,employment_length,debt,credit_score,loan_amount,interest_rate,term,purpose,grade,delinquencies,inquiries,open_accounts,default",
                8000,
            ),
        ];
        for (file, header, rows) in expected {
            let text = std::fs::read_to_string(dir.path().join(file)).unwrap();
            assert_eq!(text.lines().next(), Some(header), "{}", file);
            assert_eq!(text.lines().count(), rows + 1, "{}", file);
        }

        let survey = std::fs::read_to_string(dir.path().join("customer_survey.csv")).unwrap();
        let header = survey.lines().next().unwrap();
        assert!(header.starts_with("respondent_id,age,income,education,q1,"));
        assert!(header.ends_with(",q20"));
        assert_eq!(survey.lines().count(), 5001);
    }

    #[test]
    fn test_real_estate_ranges() {
        let rows = real_estate(&mut rng(), 1000).unwrap();
        assert_eq!(rows.len(), 1000);
        assert!(rows.iter().all(|p| (80_000..=1_000_000).contains(&p.price)));
        assert!(rows.iter().all(|p| (1..=7).contains(&p.bedrooms)));
        assert!(rows.iter().all(|p| p.garage_spaces <= 3));
        assert!(rows
            .iter()
            .all(|p| p.renovation_year == 0 || (1990..2024).contains(&p.renovation_year)));
        let sqft: Vec<f64> = rows.iter().map(|p| p.sqft as f64).collect();
        let price: Vec<f64> = rows.iter().map(|p| p.price as f64).collect();
        assert!(stats::pearson(&sqft, &price) > 0.7);
    }

    #[test]
    fn test_ecommerce_segments_drive_value() {
        let rows = ecommerce_full(&mut rng(), 5000).unwrap();
        assert_eq!(rows[4999].transaction_id, 5000);
        assert!(rows.iter().all(|o| o.quantity >= 1 && o.date.starts_with("2023-")));
        let mean_value = |segment: &str| {
            let values: Vec<f64> = rows
                .iter()
                .filter(|o| o.customer_segment == segment)
                .map(|o| o.order_value)
                .collect();
            stats::mean(&values)
        };
        assert!(mean_value("Premium") > mean_value("Regular"));
        assert!(mean_value("Regular") > mean_value("New"));
    }

    #[test]
    fn test_credit_grades_and_gaps() {
        assert_eq!(credit_grade(600.0), "D");
        assert_eq!(credit_grade(601.0), "C");
        assert_eq!(credit_grade(750.0), "A");
        assert_eq!(credit_grade(800.0), "AA");

        let rows = credit_risk(&mut rng(), 8000).unwrap();
        assert!(rows.iter().all(|a| a.grade == credit_grade(a.credit_score as f64)));
        assert!(rows.iter().all(|a| a.term == 36 || a.term == 60));
        let missing_income = rows.iter().filter(|a| a.income.is_none()).count();
        assert!((400..=900).contains(&missing_income));
        let defaults = rows.iter().filter(|a| a.default == 1).count();
        assert!(defaults > 0 && defaults < rows.len());
    }

    #[test]
    fn test_generation_is_reproducible() {
        let a = TempDir::new().unwrap();
        let b = TempDir::new().unwrap();
        generate_all(a.path(), 7).unwrap();
        generate_all(b.path(), 7).unwrap();
        let read = |dir: &TempDir| std::fs::read(dir.path().join("daily_sales.csv")).unwrap();
        assert_eq!(read(&a), read(&b));
    }
}
