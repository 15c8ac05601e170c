use std::sync::Arc;

use rm_common::{
    api::{MatchRequest, MatchResponse},
    Candidate, CandidateSource, JobRequirement, Ranker, TextExtractor,
};

fn file_candidate(id: &str, path: &str) -> Candidate {
    Candidate {
        id: id.into(),
        file_name: format!("{id}.pdf"),
        file_path: path.into(),
        source: CandidateSource::Email,
        email_sender: Some(format!("{id}@mail.io")),
        ..Candidate::default()
    }
}

fn fake_documents(path: &str) -> String {
    match path {
        "/docs/ops.pdf" => "Ansible Terraform Linux, 5 years of experience".into(),
        "/docs/dev.pdf" => "Linux".into(),
        "/docs/corrupt.pdf" => panic!("unreadable document"),
        _ => String::new(),
    }
}

fn job() -> JobRequirement {
    JobRequirement::new(
        "Linux operations engineer with Ansible and Terraform, 5 years of experience",
        vec!["Ansible".into(), "Linux".into()],
    )
}

fn pool() -> Vec<Candidate> {
    vec![
        file_candidate("dev", "/docs/dev.pdf"),
        file_candidate("corrupt", "/docs/corrupt.pdf"),
        file_candidate("ops", "/docs/ops.pdf"),
        file_candidate("blank", "/docs/blank.pdf"),
        Candidate {
            content: "Terraform".into(),
            ..file_candidate("inline", "")
        },
    ]
}

#[tokio::test]
async fn async_ranking_matches_sync_ranking() {
    let candidates = pool();
    let ranker = Ranker::default();
    let extractor: Arc<dyn TextExtractor> = Arc::new(fake_documents);

    let sync_results = ranker.rank_all(&candidates, &job(), extractor.as_ref());
    let async_results = ranker.rank_all_async(&candidates, &job(), Arc::clone(&extractor)).await;

    assert_eq!(sync_results, async_results);

    let order: Vec<&str> = async_results.iter().map(|r| r.candidate.id.as_str()).collect();
    assert_eq!(order, vec!["ops", "dev", "inline", "corrupt", "blank"]);
    assert_eq!(async_results[0].experience_match_percentage, 100.0);
    assert!(async_results[3].unscorable);
    assert!(async_results[4].unscorable);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_response_build_counts_every_selected_candidate() {
    let request = MatchRequest {
        job_description: job().description_text,
        required_skills: Some(job().required_skills),
        max_results: Some(3),
        ..MatchRequest::default()
    };

    let response =
        MatchResponse::build_async(&request, &pool(), &Ranker::default(), Arc::new(fake_documents)).await;

    assert_eq!(response.total_resumes_processed, 5);
    assert_eq!(response.rankings.len(), 3);
    assert_eq!(response.rankings[0].resume.id, "ops");
    assert!(response.rankings.iter().all(|r| !r.unscorable));
}

#[tokio::test]
async fn async_ranking_of_no_candidates_is_empty() {
    let none: Vec<Candidate> = Vec::new();
    let results = Ranker::default()
        .rank_all_async(&none, &job(), Arc::new(fake_documents))
        .await;
    assert!(results.is_empty());

    let request = MatchRequest {
        job_description: job().description_text,
        ..MatchRequest::default()
    };
    let response = MatchResponse::build_async(&request, &[], &Ranker::default(), Arc::new(fake_documents)).await;
    assert_eq!(response.total_resumes_processed, 0);
    assert!(response.rankings.is_empty());
}
