//! Maintenance commands invoked from the CLI rather than over HTTP.

use crate::config::Config;
use crate::db::handlers::{Employees, Repository};
use crate::db::models::employees::EmployeeCreateDBRequest;
use crate::estimator::{self, TrainingSample};
use crate::types::DEPARTMENTS;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, RngExt, seq::IndexedRandom};
use sqlx::SqlitePool;
use tracing::info;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Frances", "Grace", "Hedy", "John", "Katherine", "Ken", "Linus",
    "Margaret", "Niklaus", "Radia",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Hamilton", "Hopper", "Kernighan", "Knuth", "Lamarr", "Liskov", "Lovelace", "Perlman", "Ritchie", "Shannon",
    "Thompson", "Torvalds", "Turing", "Wirth", "Johnson",
];

fn random_hire_date(rng: &mut impl Rng) -> DateTime<Utc> {
    // Anywhere within the last ten years
    let seconds_back = rng.random_range(0..(10 * 365 * 24 * 3600));
    Utc::now() - Duration::seconds(seconds_back)
}

fn random_employee(rng: &mut impl Rng) -> EmployeeCreateDBRequest {
    let first = FIRST_NAMES.choose(rng).unwrap();
    let last = LAST_NAMES.choose(rng).unwrap();
    EmployeeCreateDBRequest {
        name: Some(format!("{first} {last}")),
        department: Some(DEPARTMENTS.choose(rng).unwrap().to_string()),
        salary: rng.random_range(30_000..1_000_000) as f64,
        hire_date: random_hire_date(rng),
    }
}

/// Insert `count` randomly generated employees.
pub async fn generate_employees(pool: &SqlitePool, count: u32) -> anyhow::Result<()> {
    // Draw everything up front: the RNG must not be held across awaits
    let requests: Vec<EmployeeCreateDBRequest> = {
        let mut rng = rand::rng();
        (0..count).map(|_| random_employee(&mut rng)).collect()
    };

    let mut tx = pool.begin().await?;
    {
        let mut repo = Employees::new(&mut tx);
        for request in &requests {
            repo.create(request).await?;
        }
    }
    tx.commit().await?;

    info!("Generated {count} employees");
    Ok(())
}

/// Draw a synthetic training sample with a plausible department/tenure
/// salary structure plus noise.
fn synthetic_sample(rng: &mut impl Rng) -> TrainingSample {
    let index = rng.random_range(0..DEPARTMENTS.len());
    let hire_date = random_hire_date(rng);
    let tenure_years = (Utc::now() - hire_date).num_days() as f64 / 365.0;
    let salary = 45_000.0 + 9_000.0 * index as f64 + 4_000.0 * tenure_years + rng.random_range(-5_000.0..5_000.0);

    TrainingSample {
        department: DEPARTMENTS[index].to_string(),
        hire_date,
        salary: salary.max(0.0),
    }
}

/// Fit the salary regression on stored employees, padding sparse tables
/// with synthetic samples, and persist the artifact to `model_path`.
pub async fn train_model(pool: &SqlitePool, config: &Config, min_samples: u32) -> anyhow::Result<()> {
    let rows: Vec<(String, DateTime<Utc>, f64)> =
        sqlx::query_as("SELECT department, hire_date, salary FROM employees WHERE department IS NOT NULL")
            .fetch_all(pool)
            .await?;

    let mut samples: Vec<TrainingSample> = rows
        .into_iter()
        .map(|(department, hire_date, salary)| TrainingSample {
            department,
            hire_date,
            salary,
        })
        .collect();

    let stored = samples.len();
    if stored < min_samples as usize {
        let mut rng = rand::rng();
        samples.extend((0..(min_samples as usize - stored)).map(|_| synthetic_sample(&mut rng)));
        info!(
            "Only {stored} stored training rows; padded with {} synthetic samples",
            samples.len() - stored
        );
    }

    let model = estimator::fit(&samples)?;
    model.save(&config.model_path)?;

    info!(
        samples = samples.len(),
        "Trained salary model and wrote artifact to {}",
        config.model_path.display()
    );
    Ok(())
}
