use async_graphql::{EmptyMutation, EmptySubscription, Object, Schema, SimpleObject};
use graphql_cursor_pagination::{
    Connection, CursorPaginator, Field, PaginationConfig, PaginationInput, Record,
};
use serde_json::{json, Value as Json};

#[derive(SimpleObject, Debug, Clone)]
struct Item {
    number: String,
    description: String,
}

#[derive(SimpleObject, Debug, Clone)]
struct Charge {
    id: i64,
    order: i64,
    item: Option<Item>,
}

impl Record for Item {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "number" => Some(Field::Value(self.number.as_str().into())),
            "description" => Some(Field::Value(self.description.as_str().into())),
            _ => None,
        }
    }
}

impl Record for Charge {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "id" => Some(Field::Value(self.id.into())),
            "order" => Some(Field::Value(self.order.into())),
            "item" => Some(Field::Related(self.item.as_ref().map(|i| i as &dyn Record))),
            _ => None,
        }
    }
}

struct QueryRoot {
    charges: Vec<Charge>,
    config: PaginationConfig,
}

#[Object]
impl QueryRoot {
    async fn charges(
        &self,
        first: Option<i32>,
        after: Option<String>,
        last: Option<i32>,
        before: Option<String>,
    ) -> async_graphql::Result<Connection<Charge>> {
        let input = PaginationInput {
            first,
            after,
            last,
            before,
        };
        self.paginate(input)
    }

    async fn charges_page(
        &self,
        input: Option<PaginationInput>,
    ) -> async_graphql::Result<Connection<Charge>> {
        self.paginate(input.unwrap_or_default())
    }
}

impl QueryRoot {
    fn paginate(&self, input: PaginationInput) -> async_graphql::Result<Connection<Charge>> {
        let request = input.into_request(&self.config)?;
        let paginator = CursorPaginator::with_config(&self.charges, ["-order"], &self.config)?;
        Ok(paginator.connection(&request)?.with_count(paginator.count()?))
    }
}

type TestSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

fn schema(config: PaginationConfig) -> TestSchema {
    let charges = (0..20)
        .map(|i| Charge {
            id: i + 1,
            order: i % 10,
            item: Some(Item {
                number: format!("{}", i + 20),
                description: format!("description {i}"),
            }),
        })
        .collect();

    Schema::build(QueryRoot { charges, config }, EmptyMutation, EmptySubscription).finish()
}

async fn run(schema: &TestSchema, query: &str) -> Json {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

fn ids(data: &Json, field: &str) -> Vec<i64> {
    data[field]["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_forward_pagination_through_schema() {
    let schema = schema(PaginationConfig::default().with_tiebreak("id"));

    let data = run(
        &schema,
        "{ charges(first: 3) { edges { cursor node { id order } } pageInfo { hasNextPage hasPreviousPage startCursor endCursor count } } }",
    )
    .await;

    // Ordered by (-order, -id): order 9 holds ids 20 and 10, order 8 holds 19 and 9.
    assert_eq!(ids(&data, "charges"), [20, 10, 19]);
    let page_info = &data["charges"]["pageInfo"];
    assert_eq!(page_info["hasNextPage"], json!(true));
    assert_eq!(page_info["hasPreviousPage"], json!(false));
    assert_eq!(page_info["count"], json!(20));
    assert_eq!(
        page_info["endCursor"],
        data["charges"]["edges"][2]["cursor"]
    );

    let end = page_info["endCursor"].as_str().unwrap();
    let data = run(
        &schema,
        &format!(
            r#"{{ charges(first: 3, after: "{end}") {{ edges {{ node {{ id }} }} pageInfo {{ hasNextPage hasPreviousPage }} }} }}"#
        ),
    )
    .await;

    assert_eq!(ids(&data, "charges"), [9, 18, 8]);
    assert_eq!(data["charges"]["pageInfo"]["hasNextPage"], json!(true));
    assert_eq!(data["charges"]["pageInfo"]["hasPreviousPage"], json!(true));
}

#[tokio::test]
async fn test_backward_pagination_through_input_object() {
    let schema = schema(PaginationConfig::default().with_tiebreak("id"));

    let data = run(
        &schema,
        "{ chargesPage(input: { last: 2 }) { edges { node { id } } pageInfo { hasNextPage hasPreviousPage } } }",
    )
    .await;

    assert_eq!(ids(&data, "chargesPage"), [11, 1]);
    assert_eq!(data["chargesPage"]["pageInfo"]["hasNextPage"], json!(false));
    assert_eq!(data["chargesPage"]["pageInfo"]["hasPreviousPage"], json!(true));
}

#[tokio::test]
async fn test_default_page_size_applies_without_arguments() {
    let schema = schema(PaginationConfig::default().with_default_page_size(5));

    let data = run(&schema, "{ chargesPage { edges { node { id } } pageInfo { hasNextPage } } }").await;

    assert_eq!(ids(&data, "chargesPage").len(), 5);
    assert_eq!(data["chargesPage"]["pageInfo"]["hasNextPage"], json!(true));
}

#[tokio::test]
async fn test_invalid_cursor_is_reported() {
    let schema = schema(PaginationConfig::default());
    let response = schema
        .execute(r#"{ charges(first: 2, after: "not-a-cursor") { edges { cursor } } }"#)
        .await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0].message.starts_with("Invalid cursor"));
}

#[tokio::test]
async fn test_page_size_above_max_is_rejected() {
    let schema = schema(PaginationConfig::default().with_max_page_size(10));
    let response = schema.execute("{ charges(first: 11) { edges { cursor } } }").await;

    assert_eq!(response.errors.len(), 1);
    assert!(response.errors[0]
        .message
        .starts_with("Invalid pagination arguments"));
}

#[tokio::test]
async fn test_empty_page_has_null_cursors() {
    let schema = schema(PaginationConfig::default());
    let data = run(
        &schema,
        "{ charges(first: 0) { edges { cursor } pageInfo { hasNextPage startCursor endCursor } } }",
    )
    .await;

    assert_eq!(data["charges"]["edges"], json!([]));
    assert_eq!(data["charges"]["pageInfo"]["hasNextPage"], json!(true));
    assert_eq!(data["charges"]["pageInfo"]["startCursor"], Json::Null);
    assert_eq!(data["charges"]["pageInfo"]["endCursor"], Json::Null);
}
