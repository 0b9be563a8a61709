//! Integration tests for StudentService over both document store backends.

use mahasiswa::validation::ValidationErrors;
use mahasiswa::{
    DocumentStore, FileDocumentStore, InMemoryDocumentStore, ServiceError, Student, StudentForm,
    StudentService, CLASS_REQUIRED, NAME_REQUIRED, NIM_REQUIRED, NIM_TAKEN,
};

fn nims<S: DocumentStore>(service: &StudentService<S>) -> Vec<String> {
    service
        .list()
        .unwrap()
        .into_iter()
        .map(|s| s.nim)
        .collect()
}

fn expect_invalid(result: Result<Student, ServiceError>) -> ValidationErrors {
    match result {
        Err(ServiceError::Invalid(errors)) => errors,
        other => panic!("expected validation failure, got {other:?}"),
    }
}

/// The end-to-end walk through create, reject, update and delete.
fn lifecycle_scenario<S: DocumentStore>(service: StudentService<S>) {
    let awi = service.create(&StudentForm::new("Awi", "123", "A")).unwrap();
    assert_eq!(nims(&service), vec!["123"]);

    let errors = expect_invalid(service.create(&StudentForm::new("", "124", "A")));
    assert!(errors.contains("nama", NAME_REQUIRED));
    assert_eq!(nims(&service), vec!["123"]);

    let errors = expect_invalid(service.create(&StudentForm::new("Muiz", "123", "B")));
    assert!(errors.contains("nim", NIM_TAKEN));
    assert_eq!(service.count().unwrap(), 1);

    let updated = service
        .update(&awi.id, "123", &StudentForm::new("Awi Renamed", "123", "C"))
        .unwrap();
    assert_eq!(updated.id, awi.id);
    assert_eq!(service.get("123").unwrap().name, "Awi Renamed");

    let removed = service.delete("123").unwrap();
    assert_eq!(removed.id, awi.id);
    assert!(service.get("123").unwrap_err().is_not_found());
    assert!(service.list().unwrap().is_empty());
}

#[test]
fn lifecycle_in_memory() {
    lifecycle_scenario(StudentService::new(InMemoryDocumentStore::new()));
}

#[test]
fn lifecycle_file_backed() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileDocumentStore::open(dir.path().join("mahasiswa.json")).unwrap();
    lifecycle_scenario(StudentService::new(store));
}

#[test]
fn valid_create_is_listed() {
    let service = StudentService::new(InMemoryDocumentStore::new());
    for (i, nim) in ["10", "20", "30"].iter().enumerate() {
        let created = service
            .create(&StudentForm::new(format!("Student {i}"), *nim, "A"))
            .unwrap();
        assert!(!created.id.is_empty());
        assert!(service.list().unwrap().contains(&created));
    }
    assert_eq!(nims(&service), vec!["10", "20", "30"]);
}

#[test]
fn each_empty_field_is_reported_and_nothing_persisted() {
    let service = StudentService::new(InMemoryDocumentStore::new());
    let cases = [
        (StudentForm::new("", "1", "A"), "nama", NAME_REQUIRED),
        (StudentForm::new("Awi", "", "A"), "nim", NIM_REQUIRED),
        (StudentForm::new("Awi", "1", ""), "kelas", CLASS_REQUIRED),
    ];

    for (form, field, message) in cases {
        let errors = expect_invalid(service.create(&form));
        assert_eq!(errors.len(), 1, "{field}");
        assert!(errors.contains(field, message));
    }
    assert_eq!(service.count().unwrap(), 0);
}

#[test]
fn update_keeping_nim_never_conflicts_with_itself() {
    let service = StudentService::new(InMemoryDocumentStore::new());
    let awi = service.create(&StudentForm::new("Awi", "123", "A")).unwrap();
    service.create(&StudentForm::new("Muiz", "456", "A")).unwrap();

    for class_name in ["B", "C", "D"] {
        service
            .update(&awi.id, "123", &StudentForm::new("Awi", "123", class_name))
            .unwrap();
    }
    assert_eq!(service.get("123").unwrap().class_name, "D");
}

#[test]
fn update_may_move_to_unused_nim() {
    let service = StudentService::new(InMemoryDocumentStore::new());
    let awi = service.create(&StudentForm::new("Awi", "123", "A")).unwrap();

    service
        .update(&awi.id, "123", &StudentForm::new("Awi", "999", "A"))
        .unwrap();

    assert!(service.find("123").unwrap().is_none());
    assert_eq!(service.get("999").unwrap().id, awi.id);
}

#[test]
fn update_onto_other_records_nim_leaves_both_untouched() {
    let service = StudentService::new(InMemoryDocumentStore::new());
    let awi = service.create(&StudentForm::new("Awi", "123", "A")).unwrap();
    let muiz = service.create(&StudentForm::new("Muiz", "456", "B")).unwrap();

    let errors = expect_invalid(service.update(
        &awi.id,
        "123",
        &StudentForm::new("Awi Changed", "456", "Z"),
    ));
    assert!(errors.contains("nim", NIM_TAKEN));

    assert_eq!(service.get("123").unwrap(), awi);
    assert_eq!(service.get("456").unwrap(), muiz);
}

#[test]
fn update_collects_every_failure() {
    let service = StudentService::new(InMemoryDocumentStore::new());
    let awi = service.create(&StudentForm::new("Awi", "123", "A")).unwrap();
    service.create(&StudentForm::new("Muiz", "456", "B")).unwrap();

    let errors = expect_invalid(service.update(
        &awi.id,
        "123",
        &StudentForm::new("", "456", ""),
    ));
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["nama", "nim", "kelas"]);
}

#[test]
fn delete_removes_exactly_one_record() {
    let service = StudentService::new(InMemoryDocumentStore::new());
    for nim in ["1", "2", "3"] {
        service.create(&StudentForm::new("X", nim, "A")).unwrap();
    }

    service.delete("2").unwrap();
    assert_eq!(nims(&service), vec!["1", "3"]);
}

#[test]
fn delete_of_unknown_nim_is_not_found() {
    let service = StudentService::new(InMemoryDocumentStore::new());
    service.create(&StudentForm::new("Awi", "123", "A")).unwrap();

    let err = service.delete("nope").unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(ref nim) if nim == "nope"));
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn file_backed_records_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mahasiswa.json");

    {
        let service = StudentService::new(FileDocumentStore::open(&path).unwrap());
        service.create(&StudentForm::new("Awi", "123", "A")).unwrap();
        service.create(&StudentForm::new("Muiz", "456", "A")).unwrap();
        service.delete("456").unwrap();
    }

    let service = StudentService::new(FileDocumentStore::open(&path).unwrap());
    assert_eq!(nims(&service), vec!["123"]);
    let errors = expect_invalid(service.create(&StudentForm::new("Dup", "123", "A")));
    assert!(errors.contains("nim", NIM_TAKEN));
}

#[test]
fn concurrent_creates_keep_nim_unique() {
    let service = StudentService::new(InMemoryDocumentStore::new());

    let results: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| service.create(&StudentForm::new("X", "123", "A"))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let created = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(created, 1);
    for result in results.into_iter().filter(|r| r.is_err()) {
        let errors = expect_invalid(result);
        assert!(errors.contains("nim", NIM_TAKEN));
    }
    assert_eq!(service.count().unwrap(), 1);
}

#[test]
fn failed_snapshot_write_does_not_keep_record() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"").unwrap();
    let service = StudentService::new(FileDocumentStore::open(blocker.join("db.json")).unwrap());

    let err = service
        .create(&StudentForm::new("Awi", "123", "A"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Store(_)));
    assert_eq!(service.count().unwrap(), 0);

    // The retry fails on the write again, not as a duplicate.
    let err = service
        .create(&StudentForm::new("Awi", "123", "A"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Store(_)));
}
