//! Typed GitHub GraphQL documents
//!
//! Requests carry user data only through `variables`, never by splicing it
//! into the query text.

use crate::types::PullRequest;
use serde::{Deserialize, Serialize};

pub const REPOSITORY_ID_QUERY: &str = r"
query RepositoryId($owner: String!, $name: String!) {
    repository(owner: $owner, name: $name) {
        id
    }
}
";

pub const CREATE_PULL_REQUEST_MUTATION: &str = r"
mutation CreatePullRequest($input: CreatePullRequestInput!) {
    createPullRequest(input: $input) {
        pullRequest {
            number
            url
            baseRefName
            headRefName
            title
        }
    }
}
";

/// A GraphQL request body
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RepositoryIdVariables<'a> {
    pub owner: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryIdData {
    pub repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryNode {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePullRequestVariables<'a> {
    pub input: CreatePullRequestInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePullRequestInput<'a> {
    pub repository_id: &'a str,
    pub base_ref_name: &'a str,
    pub head_ref_name: &'a str,
    pub title: &'a str,
    pub body: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePullRequestData {
    pub create_pull_request: CreatePullRequestPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePullRequestPayload {
    pub pull_request: GraphQlPullRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlPullRequest {
    pub number: u64,
    pub url: String,
    pub base_ref_name: String,
    pub head_ref_name: String,
    pub title: String,
}

impl From<GraphQlPullRequest> for PullRequest {
    fn from(pr: GraphQlPullRequest) -> Self {
        Self {
            number: pr.number,
            html_url: pr.url,
            base_ref: pr.base_ref_name,
            head_ref: pr.head_ref_name,
            title: pr.title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_pull_request_variables_escape_user_text() {
        let request = GraphQlRequest {
            query: CREATE_PULL_REQUEST_MUTATION,
            variables: CreatePullRequestVariables {
                input: CreatePullRequestInput {
                    repository_id: "R_1",
                    base_ref_name: "master",
                    head_ref_name: "Issue42",
                    title: "Implement \"quoted\" issue",
                    body: "line\n\"}\") { injected }",
                },
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["variables"],
            json!({
                "input": {
                    "repositoryId": "R_1",
                    "baseRefName": "master",
                    "headRefName": "Issue42",
                    "title": "Implement \"quoted\" issue",
                    "body": "line\n\"}\") { injected }",
                }
            })
        );
        assert!(!value["query"].as_str().unwrap().contains("Issue42"));
    }

    #[test]
    fn test_parse_create_pull_request_response() {
        let body = json!({
            "data": {
                "createPullRequest": {
                    "pullRequest": {
                        "number": 7,
                        "url": "https://github.com/o/r/pull/7",
                        "baseRefName": "master",
                        "headRefName": "Issue42",
                        "title": "Implement issue 42"
                    }
                }
            }
        });

        let response: GraphQlResponse<CreatePullRequestData> =
            serde_json::from_value(body).unwrap();
        let pr: PullRequest = response
            .data
            .unwrap()
            .create_pull_request
            .pull_request
            .into();

        assert_eq!(pr.number, 7);
        assert_eq!(pr.head_ref, "Issue42");
        assert_eq!(pr.html_url, "https://github.com/o/r/pull/7");
    }

    #[test]
    fn test_parse_error_response() {
        let body = json!({
            "data": { "repository": null },
            "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a Repository" }]
        });

        let response: GraphQlResponse<RepositoryIdData> = serde_json::from_value(body).unwrap();
        assert!(response.data.unwrap().repository.is_none());
        assert_eq!(
            response.errors.unwrap()[0].message,
            "Could not resolve to a Repository"
        );
    }
}
