//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: the health probes via `#[utoipa::path]`, and every versioned
//!   users route through [`VersionedUsersAddon`]. The users handlers are
//!   generic over their representation, so their operations are assembled
//!   with the utoipa builders rather than the path macro.
//! - **Schemas**: records, projections, HAL envelopes and the error payload.
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::path::{
    HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItem,
    PathItemBuilder,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::{Response, ResponseBuilder, ResponsesBuilder};
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, Schema, SchemaType, Type};
use utoipa::openapi::{Ref, RefOr, Required};
use utoipa::{Modify, OpenApi};

use crate::domain::{User, UserView};
use crate::inbound::http::error::ErrorDetails;
use crate::inbound::http::health::{ProbeReport, ServerPhase};
use crate::inbound::http::representation::{
    CollectionLinks, DeletedBody, DeletedModel, EmbeddedUsers, HAL_JSON, JSON, Link, SelfLinks,
    UserCollectionModel, UserLinks, UserModel,
};
use crate::inbound::http::users::CreateUserRequest;
use crate::inbound::http::versioning::{ApiVersion, VERSION_HEADER, VERSION_PARAM};

/// One mounted copy of the CRUD routes.
struct Surface {
    prefix: &'static str,
    tag: &'static str,
    content_type: &'static str,
    item: &'static str,
    hal: bool,
    /// `apiVersion` tag on create and delete bodies.
    tagged: bool,
    alternate: Option<ApiVersion>,
}

const SURFACES: [Surface; 4] = [
    Surface {
        prefix: "",
        tag: "users",
        content_type: JSON,
        item: "User",
        hal: false,
        tagged: false,
        alternate: None,
    },
    Surface {
        prefix: "/v1",
        tag: "users-v1",
        content_type: JSON,
        item: "User",
        hal: false,
        tagged: false,
        alternate: Some(ApiVersion::V1),
    },
    Surface {
        prefix: "/v2",
        tag: "users-v2",
        content_type: JSON,
        item: "UserView",
        hal: false,
        tagged: true,
        alternate: Some(ApiVersion::V2),
    },
    Surface {
        prefix: "/v3",
        tag: "users-v3",
        content_type: HAL_JSON,
        item: "UserModel",
        hal: true,
        tagged: false,
        alternate: None,
    },
];

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn typed(kind: Type) -> Schema {
    Schema::Object(ObjectBuilder::new().schema_type(SchemaType::Type(kind)).build())
}

fn body_response(description: &str, content_type: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(content_type, ContentBuilder::new().schema(Some(schema)).build())
        .build()
}

fn error_response(description: &str) -> Response {
    body_response(description, JSON, schema_ref("ErrorDetails"))
}

fn id_parameter() -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(typed(Type::Integer)))
        .build()
}

impl Surface {
    fn operation(&self, id: &str, summary: &str) -> OperationBuilder {
        OperationBuilder::new()
            .operation_id(Some(format!("{id}{}", self.prefix.replace('/', "_"))))
            .summary(Some(summary))
            .tag(self.tag)
    }

    fn get_user(&self) -> Operation {
        let mut responses = ResponsesBuilder::new().response(
            "200",
            body_response("User", self.content_type, schema_ref(self.item)),
        );
        if self.hal {
            responses = responses.response("404", error_response("User not found"));
        }
        self.operation("getUser", "Read one user")
            .parameter(id_parameter())
            .responses(responses.response("400", error_response("Invalid id")).build())
            .build()
    }

    fn list_users(&self) -> Operation {
        let schema = if self.hal {
            schema_ref("UserCollectionModel")
        } else {
            RefOr::T(Schema::Array(
                ArrayBuilder::new().items(schema_ref(self.item)).build(),
            ))
        };
        self.operation("listUsers", "List every user")
            .responses(
                ResponsesBuilder::new()
                    .response("200", body_response("Users", self.content_type, schema))
                    .build(),
            )
            .build()
    }

    fn created_schema(&self) -> RefOr<Schema> {
        if self.hal {
            return schema_ref("UserModel");
        }
        let mut body = ObjectBuilder::new()
            .property("message", typed(Type::String))
            .required("message")
            .property("data", schema_ref(self.item))
            .required("data");
        if self.tagged {
            body = body.property("apiVersion", typed(Type::String));
        }
        RefOr::T(Schema::Object(body.build()))
    }

    fn create_user(&self) -> Operation {
        let request = RequestBodyBuilder::new()
            .content(
                JSON,
                ContentBuilder::new()
                    .schema(Some(schema_ref("CreateUserRequest")))
                    .build(),
            )
            .required(Some(Required::True))
            .build();
        let created = ResponseBuilder::new()
            .description("User created; `Location` points at it")
            .content(
                self.content_type,
                ContentBuilder::new()
                    .schema(Some(self.created_schema()))
                    .build(),
            )
            .build();
        self.operation("createUser", "Create a user")
            .request_body(Some(request))
            .responses(
                ResponsesBuilder::new()
                    .response("201", created)
                    .response("400", error_response("Validation failed"))
                    .response("409", error_response("Id already in use"))
                    .build(),
            )
            .build()
    }

    fn delete_user(&self) -> Operation {
        let deleted = if self.hal { "DeletedModel" } else { "DeletedBody" };
        self.operation("deleteUser", "Delete a user")
            .parameter(id_parameter())
            .responses(
                ResponsesBuilder::new()
                    .response(
                        "200",
                        body_response("User deleted", self.content_type, schema_ref(deleted)),
                    )
                    .response("400", error_response("Non-positive id"))
                    .response("404", error_response("User not found"))
                    .build(),
            )
            .build()
    }

    fn paths(&self) -> Vec<(String, PathItem)> {
        let collection = PathItemBuilder::new()
            .operation(HttpMethod::Get, self.list_users())
            .operation(HttpMethod::Post, self.create_user())
            .build();
        let item = PathItemBuilder::new()
            .operation(HttpMethod::Get, self.get_user())
            .operation(HttpMethod::Delete, self.delete_user())
            .build();
        let mut paths = vec![
            (format!("{}/users", self.prefix), collection),
            (format!("{}/users/{{id}}", self.prefix), item),
        ];
        if let Some(version) = self.alternate {
            paths.extend(self.alternate_paths(version));
        }
        paths
    }

    fn alternate_paths(&self, version: ApiVersion) -> Vec<(String, PathItem)> {
        let by_param = self
            .operation("getUserByParam", "Read one user, version chosen by query")
            .parameter(id_parameter())
            .parameter(
                ParameterBuilder::new()
                    .name(VERSION_PARAM)
                    .parameter_in(ParameterIn::Query)
                    .required(Required::True)
                    .description(Some(format!("Must be `{}`", version.number())))
                    .schema(Some(typed(Type::String)))
                    .build(),
            )
            .responses(
                ResponsesBuilder::new()
                    .response("200", body_response("User", JSON, schema_ref(self.item)))
                    .build(),
            )
            .build();
        let by_header = self
            .operation("getUserByHeader", "Read one user, version chosen by header")
            .parameter(id_parameter())
            .parameter(
                ParameterBuilder::new()
                    .name(VERSION_HEADER)
                    .parameter_in(ParameterIn::Header)
                    .required(Required::True)
                    .description(Some(format!("Must be `{}`", version.number())))
                    .schema(Some(typed(Type::String)))
                    .build(),
            )
            .responses(
                ResponsesBuilder::new()
                    .response("200", body_response("User", JSON, schema_ref(self.item)))
                    .build(),
            )
            .build();
        let by_media_type = self
            .operation("getUserByMediaType", "Read one user, version chosen by Accept")
            .parameter(id_parameter())
            .responses(
                ResponsesBuilder::new()
                    .response(
                        "200",
                        body_response("User", version.media_type(), schema_ref(self.item)),
                    )
                    .build(),
            )
            .build();

        [("param", by_param), ("header", by_header), ("accept", by_media_type)]
            .into_iter()
            .map(|(segment, operation)| {
                (
                    format!("{}/users/{segment}/{{id}}", self.prefix),
                    PathItemBuilder::new()
                        .operation(HttpMethod::Get, operation)
                        .build(),
                )
            })
            .collect()
    }
}

/// Add every versioned users route to the document.
struct VersionedUsersAddon;

impl Modify for VersionedUsersAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for surface in &SURFACES {
            for (path, item) in surface.paths() {
                openapi.paths.paths.insert(path, item);
            }
        }
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&VersionedUsersAddon),
    info(
        title = "Users API",
        description = "Versioned user management: URI, query, header and media type versioning plus HAL hypermedia."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        UserView,
        CreateUserRequest,
        DeletedBody,
        Link,
        UserLinks,
        UserModel,
        EmbeddedUsers,
        SelfLinks,
        UserCollectionModel,
        CollectionLinks,
        DeletedModel,
        ErrorDetails,
        ProbeReport,
        ServerPhase
    )),
    tags(
        (name = "users", description = "Unversioned users API (same shapes as v1)"),
        (name = "users-v1", description = "Users as stored"),
        (name = "users-v2", description = "Users with full name and age"),
        (name = "users-v3", description = "Users as HAL resources"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
