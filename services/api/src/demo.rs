use crate::infra::{
    demo_directory, InMemoryDirectory, InMemoryOutcomeRepository, InMemoryQuestionRepository,
};
use clap::Args;
use hr_evaluation::error::AppError;
use hr_evaluation::workflows::evaluation::{
    AnswerSheet, ApplicantDirectory, ApplicantFilter, CallerIdentity, DirectorySnapshot,
    EvaluationService, EvaluationSubmission, JobFilter, JobId, JobStatus, NewQuestion, Question,
};
use std::path::PathBuf;
use std::sync::Arc;

type DemoService =
    EvaluationService<InMemoryQuestionRepository, InMemoryOutcomeRepository, InMemoryDirectory>;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Directory snapshot (JSON) to evaluate instead of the built-in sample data.
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Job to author questions for. Defaults to the first active job.
    #[arg(long)]
    pub(crate) job: Option<String>,
}

const DEMO_QUESTIONS: [(&str, [&str; 3], &str); 3] = [
    (
        "Which HTTP status signals a duplicate submission?",
        ["200", "409", "500"],
        "409",
    ),
    (
        "What does an idempotent operation guarantee?",
        [
            "Repeating it leaves the same state",
            "It never fails",
            "It runs exactly once",
        ],
        "Repeating it leaves the same state",
    ),
    (
        "Which log level suits a rejected duplicate?",
        ["trace", "warn", "error"],
        "warn",
    ),
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { snapshot, job } = args;

    let snapshot = match snapshot {
        Some(path) => DirectorySnapshot::from_path(path)?,
        None => demo_directory(),
    };
    let directory = Arc::new(InMemoryDirectory::from(snapshot));
    let service: DemoService = EvaluationService::new(
        Arc::new(InMemoryQuestionRepository::default()),
        Arc::new(InMemoryOutcomeRepository::default()),
        directory.clone(),
    );

    println!("Applicant evaluation demo");

    let job_id = match job.map(JobId) {
        Some(job_id) => job_id,
        None => match first_active_job(&directory) {
            Some(job_id) => job_id,
            None => {
                println!("No active job in the directory; nothing to evaluate");
                return Ok(());
            }
        },
    };

    let recruiter = CallerIdentity {
        user_id: "demo-recruiter".to_string(),
        role: Some("hr".to_string()),
    };
    let mut questions = Vec::new();
    for (text, options, correct) in DEMO_QUESTIONS {
        let request = NewQuestion {
            job_id: job_id.clone(),
            question: text.to_string(),
            options: options.iter().map(|option| option.to_string()).collect(),
            correct_answer: correct.to_string(),
        };
        match service.create_question(request, Some(&recruiter)) {
            Ok(question) => questions.push(question),
            Err(err) => {
                println!("  Question rejected: {}", err);
                return Ok(());
            }
        }
    }
    println!("\nQuestion bank for {}", job_id);
    for question in &questions {
        println!("- {} [{}]", question.question, question.options.join(" | "));
    }

    let rejected = service.create_question(
        NewQuestion {
            job_id: job_id.clone(),
            question: "Pick one".to_string(),
            options: vec!["Only".to_string(), "  ".to_string()],
            correct_answer: "Only".to_string(),
        },
        Some(&recruiter),
    );
    if let Err(err) = rejected {
        println!("- Single-option question rejected: {}", err);
    }

    println!("\nSubmissions");
    let applicants = match directory.applicants() {
        Ok(applicants) => applicants,
        Err(err) => {
            println!("  Directory unavailable: {}", err);
            return Ok(());
        }
    };
    let candidates: Vec<_> = applicants
        .into_iter()
        .filter(|applicant| applicant.job_id == job_id)
        .collect();
    if candidates.is_empty() {
        println!("- No applicants for {}", job_id);
    }

    // Each later candidate gets one fewer correct answer; the last one stays pending.
    let submitting = candidates.len().saturating_sub(1).max(1).min(candidates.len());
    for (index, applicant) in candidates.iter().take(submitting).enumerate() {
        let submission = EvaluationSubmission {
            job_id: job_id.clone(),
            applicant_id: applicant.id.clone(),
            answers: answer_sheet(&questions, questions.len().saturating_sub(index)),
        };
        match service.submit_evaluation(submission.clone()) {
            Ok(outcome) => println!(
                "- {} scored {}/{}",
                applicant.full_name, outcome.score, outcome.total
            ),
            Err(err) => println!("- {} rejected: {}", applicant.full_name, err),
        }

        if index == 0 {
            if let Err(err) = service.submit_evaluation(submission) {
                println!("  Resubmission for {} refused: {}", applicant.full_name, err);
            }
        }
    }

    render_dashboard(&service);
    Ok(())
}

fn first_active_job(directory: &InMemoryDirectory) -> Option<JobId> {
    directory
        .jobs()
        .ok()?
        .into_iter()
        .find(|job| job.status == JobStatus::Active)
        .map(|job| job.id)
}

fn answer_sheet(questions: &[Question], correct: usize) -> AnswerSheet {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = if index < correct {
                question.correct_answer.clone()
            } else {
                question
                    .options
                    .iter()
                    .find(|option| **option != question.correct_answer)
                    .cloned()
                    .unwrap_or_default()
            };
            (question.id.clone(), selected)
        })
        .collect()
}

fn render_dashboard(service: &DemoService) {
    match service.job_board(&JobFilter::default()) {
        Ok(board) => {
            println!("\nJobs");
            println!(
                "- {} jobs ({} active) | {} applicants | {} pending evaluations",
                board.stats.total_jobs,
                board.stats.active_jobs,
                board.stats.total_applicants,
                board.stats.pending_evaluations
            );
            for job in &board.jobs {
                println!(
                    "  - {} / {} [{}] {} applicants",
                    job.title,
                    if job.department.is_empty() {
                        "-"
                    } else {
                        job.department.as_str()
                    },
                    job.status.label(),
                    job.applicants
                );
            }
        }
        Err(err) => println!("\nJob board unavailable: {}", err),
    }

    match service.applicant_overview(&ApplicantFilter::default()) {
        Ok(overview) => {
            println!("\nEvaluation summary");
            println!(
                "- {} applicants | {} pending | {} completed",
                overview.stats.total,
                overview.stats.pending_evaluation,
                overview.stats.completed_evaluation
            );
            if !overview.departments.is_empty() {
                println!("- Departments: {}", overview.departments.join(", "));
            }
        }
        Err(err) => println!("\nEvaluation summary unavailable: {}", err),
    }

    match service.evaluations() {
        Ok(entries) => {
            println!("\nBy department");
            for (department, members) in
                hr_evaluation::workflows::evaluation::report::group_by_department(&entries)
            {
                println!("{}", department);
                for entry in members {
                    let tier = entry
                        .classification
                        .tier()
                        .map(|tier| format!(" ({})", tier.label()))
                        .unwrap_or_default();
                    println!(
                        "  - {} | {} | {}{}",
                        entry.applicant.full_name,
                        entry.applicant.job_title,
                        entry.classification.label(),
                        tier
                    );
                }
            }
        }
        Err(err) => println!("\nDepartment breakdown unavailable: {}", err),
    }
}
