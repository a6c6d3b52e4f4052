use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_todos() {
    let mut app = helper::setup_test_app().await;

    // verify empty list
    let (status_code, todos) = helper::list_todos(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(Vec::<helper::Todo>::new()), todos);

    // create todos
    let buy_milk = helper::create_todo(&mut app, "buy milk").await;
    assert_eq!(1, buy_milk.id);
    assert_eq!("buy milk".to_string(), buy_milk.content);

    let walk_dog = helper::create_todo(&mut app, "walk dog").await;
    assert_eq!(2, walk_dog.id);
    assert_eq!("walk dog".to_string(), walk_dog.content);

    // newest first, exactly as created
    let (status_code, todos) = helper::list_todos(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(vec![walk_dog, buy_milk]), todos);

    // delete the first one
    let (status_code, message, _) = helper::maybe_delete_todo(&mut app, "1").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some("Todo deleted".to_string()), message);

    // only once
    let (status_code, _, error) = helper::maybe_delete_todo(&mut app, "1").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Todo not found".to_string()), error);

    // the other one is left
    let (status_code, todos) = helper::list_todos(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    let todos = todos.unwrap();
    assert_eq!(1, todos.len());
    assert_eq!(2, todos[0].id);
}

#[tokio::test]
async fn test_todos_are_sorted_by_id() {
    let mut app = helper::setup_test_app().await;

    for content in ["one", "two", "three", "four", "five"] {
        helper::create_todo(&mut app, content).await;
    }

    // gaps do not change the order
    let (status_code, _, _) = helper::maybe_delete_todo(&mut app, "3").await;
    assert_eq!(StatusCode::OK, status_code);

    helper::create_todo(&mut app, "six").await;

    let (status_code, todos) = helper::list_todos(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    let ids = todos
        .unwrap()
        .iter()
        .map(|todo| todo.id)
        .collect::<Vec<_>>();
    assert_eq!(vec![6, 5, 4, 2, 1], ids);
}
