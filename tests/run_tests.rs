use git2::Repository;
use greenleeks::{Error, Outcome, RunState, run};
use std::fs;
use tempfile::TempDir;

use test_utils::{
    commit_count, create_files, head_author, options_for, setup_project, write_gitconfig,
    write_user_gitconfig,
};

#[test]
fn test_untracked_directory_gets_single_commit() {
    let (project, _config_dir, gitconfig) = setup_project(5);
    let options = options_for(project.path(), &gitconfig, 100);

    let outcome = run(&options).expect("Run should succeed");

    match outcome {
        Outcome::Committed {
            author, summary, ..
        } => {
            assert_eq!(author.name, "Test User");
            assert_eq!(summary.files, 5);
        }
        Outcome::AlreadyTracked { .. } => panic!("Expected a commit to be made"),
    }
    assert_eq!(commit_count(project.path()), 1);
    assert_eq!(
        head_author(project.path()),
        ("Test User".to_string(), "test@example.com".to_string())
    );
}

#[test]
fn test_already_tracked_directory_is_left_alone() {
    let (project, _config_dir, gitconfig) = setup_project(2);
    Repository::init(project.path()).expect("Failed to initialize repository");
    let options = options_for(project.path(), &gitconfig, 100);

    let outcome = run(&options).expect("Run should succeed");

    assert!(matches!(outcome, Outcome::AlreadyTracked { .. }));
    assert_eq!(commit_count(project.path()), 0);
    let repo = Repository::open(project.path()).expect("Failed to open repository");
    assert!(repo.index().expect("Failed to get index").is_empty());
}

#[test]
fn test_second_run_is_a_no_op() {
    let (project, _config_dir, gitconfig) = setup_project(3);
    let options = options_for(project.path(), &gitconfig, 100);

    run(&options).expect("First run should succeed");
    let first_head = Repository::open(project.path())
        .expect("Failed to open repository")
        .refname_to_id("HEAD")
        .expect("Failed to resolve HEAD");

    fs::write(project.path().join("later.txt"), "added later").expect("Failed to write file");
    let outcome = run(&options).expect("Second run should succeed");

    assert!(matches!(outcome, Outcome::AlreadyTracked { .. }));
    let second_head = Repository::open(project.path())
        .expect("Failed to open repository")
        .refname_to_id("HEAD")
        .expect("Failed to resolve HEAD");
    assert_eq!(first_head, second_head);
    assert_eq!(commit_count(project.path()), 1);
}

#[test]
fn test_too_many_files_prevents_commit() {
    let (project, _config_dir, gitconfig) = setup_project(12);
    let options = options_for(project.path(), &gitconfig, 10);

    let err = run(&options).expect_err("Run should hit the file limit");

    assert_eq!(err.state, RunState::Initialized);
    assert!(
        matches!(
            err.error(),
            Error::FileCountLimitExceeded {
                count: 11,
                limit: 10
            }
        ),
        "Expected FileCountLimitExceeded, got {err:?}"
    );
    assert_eq!(
        err.to_string(),
        "failed to count files: too many files (11), limit is 10"
    );
    // The repository exists but nothing was committed
    assert!(project.path().join(".git").is_dir());
    assert_eq!(commit_count(project.path()), 0);
}

#[test]
fn test_repository_metadata_counts_toward_limit() {
    // Exactly at the limit before init; the files written into .git push it over
    let (project, _config_dir, gitconfig) = setup_project(100);
    let options = options_for(project.path(), &gitconfig, 100);

    let err = run(&options).expect_err("Run should hit the file limit");

    assert!(err.error().is_limit_exceeded(), "Expected limit error, got {err:?}");
    assert_eq!(
        err.error().to_string(),
        "too many files (101), limit is 100"
    );
    assert_eq!(commit_count(project.path()), 0);
}

#[test]
fn test_missing_user_section_commits_with_placeholder_identity() {
    let project = TempDir::new().expect("Failed to create project directory");
    let config_dir = TempDir::new().expect("Failed to create config directory");
    create_files(project.path(), 1);
    let gitconfig = write_gitconfig(config_dir.path(), "[core]\n\tbare = false\n");
    let options = options_for(project.path(), &gitconfig, 100);

    run(&options).expect("Run should succeed");

    assert_eq!(
        head_author(project.path()),
        (
            "Your Name".to_string(),
            "your.email@example.com".to_string()
        )
    );
}

#[test]
fn test_missing_gitconfig_fails_before_touching_directory() {
    let project = TempDir::new().expect("Failed to create project directory");
    create_files(project.path(), 1);
    let missing = project.path().join("no-such-gitconfig");
    let options = options_for(project.path(), &missing, 100);

    let err = run(&options).expect_err("Run should fail without a git config");

    assert_eq!(err.state, RunState::Idle);
    assert!(
        matches!(err.error(), Error::ConfigRead { .. }),
        "Expected ConfigRead, got {err:?}"
    );
    assert!(err.to_string().starts_with("failed to load git config: "));
    assert!(!project.path().join(".git").exists());
}

#[test]
fn test_commit_failure_names_the_commit_step() {
    let project = TempDir::new().expect("Failed to create project directory");
    let config_dir = TempDir::new().expect("Failed to create config directory");
    create_files(project.path(), 1);
    let gitconfig = write_user_gitconfig(config_dir.path(), "Bad <Name>", "bad@example.com");
    let options = options_for(project.path(), &gitconfig, 100);

    let err = run(&options).expect_err("Run should fail on the invalid identity");

    assert_eq!(err.state, RunState::Counted);
    assert!(matches!(err.error(), Error::Commit(_)), "Expected Commit, got {err:?}");
    assert!(
        err.to_string().starts_with("failed to stage and commit files: "),
        "Unexpected message: {err}"
    );
}

#[test]
fn test_unreadable_repository_state_is_reported_but_still_a_no_op() {
    let (project, _config_dir, gitconfig) = setup_project(1);
    let repo = Repository::init(project.path()).expect("Failed to initialize repository");
    // A corrupt branch ref makes HEAD unresolvable while discovery still succeeds
    fs::write(repo.path().join("HEAD"), "ref: refs/heads/main\n").expect("Failed to write HEAD");
    fs::write(repo.path().join("refs").join("heads").join("main"), "not an object id\n")
        .expect("Failed to write branch ref");
    let options = options_for(project.path(), &gitconfig, 100);

    let outcome = run(&options).expect("Run should succeed");

    assert!(matches!(outcome, Outcome::AlreadyTracked { .. }));
    assert_eq!(commit_count(project.path()), 0);
}
