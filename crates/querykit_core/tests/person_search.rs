use querykit_core::db::open_db_in_memory;
use querykit_core::{
    MatchMode, MemoryStore, PageRequest, Person, PersonDto, PersonRepository, PersonSearch,
    PersonSearchService, RepoError, SqlitePersonRepository,
};

fn seed(repo: &SqlitePersonRepository<'_>) {
    let mut ada = Person::new("Ada", "Lovelace");
    ada.add_address("St James's Square");
    repo.save(&ada).unwrap();
    repo.save(&Person::new("Adele", "Goldberg")).unwrap();
    repo.save(&Person::new("Alan", "Turing")).unwrap();
}

#[test]
fn empty_search_pages_through_everyone() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::new(&conn);
    seed(&repo);
    let service = PersonSearchService::new(repo);

    let page = service
        .search(&PersonSearch::default(), PageRequest::new(0, 2))
        .unwrap();
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.number_of_elements(), 2);
    // surname ASC
    assert_eq!(page.content[0].surname, "Goldberg");
    assert_eq!(page.content[1].surname, "Lovelace");
    assert!(page.has_next());
}

#[test]
fn starts_with_search_and_join_fetch() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::new(&conn);
    seed(&repo);
    let service = PersonSearchService::new(repo);

    let search = PersonSearch {
        name: Some("Ad".to_string()),
        mode: MatchMode::StartsWith,
        with_addresses: true,
        ..PersonSearch::default()
    };
    let page = service.search(&search, PageRequest::first(10)).unwrap();
    let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Adele", "Ada"]);
    assert_eq!(page.content[1].addresses().map(<[_]>::len), Some(1));
    assert_eq!(page.content[0].addresses().map(<[_]>::len), Some(0));
}

#[test]
fn any_mode_widens_and_dtos_are_detached() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::new(&conn);
    seed(&repo);
    let service = PersonSearchService::new(repo);

    let search = PersonSearch {
        name: Some("Alan".to_string()),
        surname: Some("Lovelace".to_string()),
        any: true,
        ..PersonSearch::default()
    };
    let dtos = service.search_dtos(&search).unwrap();
    let surnames: Vec<&str> = dtos.iter().map(|dto| dto.surname.as_str()).collect();
    assert_eq!(surnames, vec!["Lovelace", "Turing"]);
}

#[test]
fn find_unique_reports_ambiguity() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePersonRepository::new(&conn);
    seed(&repo);
    let service = PersonSearchService::new(repo);

    let contains = PersonSearch {
        name: Some("l".to_string()),
        mode: MatchMode::Contains,
        ..PersonSearch::default()
    };
    let err = service.find_unique(&contains).unwrap_err();
    assert!(matches!(err, RepoError::NonUniqueResult { .. }));

    let exact = PersonSearch {
        name: Some("Alan".to_string()),
        ..PersonSearch::default()
    };
    let alan = service.find_unique(&exact).unwrap().unwrap();
    assert_eq!(alan.surname, "Turing");
}

#[test]
fn service_runs_on_memory_store() {
    let mut store = MemoryStore::new(Vec::new());
    for (id, (name, surname)) in [("Ada", "Lovelace"), ("Alan", "Turing")].into_iter().enumerate() {
        let mut person = Person::new(name, surname);
        person.id = Some(id as i64 + 1);
        store.push(person);
    }
    let service = PersonSearchService::new(store);

    let search = PersonSearch {
        surname: Some("Tur".to_string()),
        mode: MatchMode::StartsWith,
        ..PersonSearch::default()
    };
    assert_eq!(
        service.search_dtos(&search).unwrap(),
        vec![PersonDto::new(Some(2), "Alan", "Turing")]
    );
}
