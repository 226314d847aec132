use std::io::Write;

use tracing::{debug, info};

use crate::build_prompt::TemplateRegistry;
use crate::error::Result;
use crate::generate::{generate, ChatModel};
use crate::retrieve_chunks::Retriever;
use crate::vector_index::Hit;

pub const TEST_QUESTIONS: [&str; 5] = [
    "An American customer wants to return a laptop they bought 25 days ago. Based on the Global Returns and Refunds Policy, are they eligible for a return?",
    "What is the express shipping cost for a package weighing 15.0 lbs?",
    "Can a user get a refund for a digital software download after they have started the byte-stream download?",
    "Under what condition is the 5-7 day delivery guarantee suspended according to the 'Force Majeure' clause?",
    "What legal action does a user waive by agreeing to the 'Mandatory Arbitration' section of the Terms of Service?",
];

/// The questions to ask and the templates to ask them with.
#[derive(Clone, Debug)]
pub struct RunPlan {
    pub questions: Vec<String>,
    pub templates: TemplateRegistry,
}

impl Default for RunPlan {
    fn default() -> Self {
        Self {
            questions: TEST_QUESTIONS.iter().map(|q| q.to_string()).collect(),
            templates: TemplateRegistry::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Answer {
    pub template: String,
    pub text: String,
}

/// Everything produced for one question. All answers share `hits`.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionReport {
    pub question: String,
    pub answers: Vec<Answer>,
    pub hits: Vec<Hit>,
}

/// Retrieves once, then renders and generates with every template in turn.
pub fn answer_question<C: ChatModel + ?Sized>(
    question: &str,
    templates: &TemplateRegistry,
    retriever: &Retriever<'_>,
    chat: &C,
) -> Result<QuestionReport> {
    let hits = retriever.retrieve(question)?;
    let mut answers = Vec::with_capacity(templates.len());
    for template in templates.iter() {
        debug!(template = %template.name, "rendering prompt");
        let prompt = template.render(&hits, question);
        let text = generate(chat, &prompt)?;
        answers.push(Answer {
            template: template.name.clone(),
            text,
        });
    }
    Ok(QuestionReport {
        question: question.to_string(),
        answers,
        hits,
    })
}

pub fn write_report<W: Write>(out: &mut W, report: &QuestionReport) -> std::io::Result<()> {
    writeln!(out, "\nQUERY: {}", report.question)?;
    for answer in &report.answers {
        writeln!(out, "\n[{} ANSWER]:{}", answer.template, answer.text)?;
    }
    writeln!(out, "\n[SOURCES]:")?;
    for hit in &report.hits {
        writeln!(out, "- {} (Page {})", hit.chunk.source, hit.chunk.page)?;
    }
    Ok(())
}

/// Runs every question of `plan` in order, writing each report as soon as it
/// is ready. Stops at the first failure.
pub fn run<C: ChatModel + ?Sized, W: Write>(
    plan: &RunPlan,
    retriever: &Retriever<'_>,
    chat: &C,
    out: &mut W,
) -> Result<Vec<QuestionReport>> {
    let mut reports = Vec::with_capacity(plan.questions.len());
    for (i, question) in plan.questions.iter().enumerate() {
        info!(question = i + 1, total = plan.questions.len(), "answering");
        let report = answer_question(question, &plan.templates, retriever, chat)?;
        write_report(out, &report)?;
        out.flush()?;
        reports.push(report);
    }
    Ok(reports)
}
