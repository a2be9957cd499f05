use std::collections::HashMap;

use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpResponse};
use askama::Template;
use serde_json::Value;

use crate::catalog::{self, ServiceSpec};
use crate::errors::GatewayError;
use crate::upstream::{form_to_json, Upstream};

// ── Templates ────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage {
    services: &'static [ServiceSpec],
}

struct RowView {
    id: String,
    cells: Vec<String>,
}

#[derive(Template)]
#[template(path = "list.html")]
struct ListPage {
    service: &'static str,
    title: &'static str,
    columns: &'static [&'static str],
    rows: Vec<RowView>,
}

struct DetailField {
    label: &'static str,
    value: String,
}

#[derive(Template)]
#[template(path = "detail.html")]
struct DetailPage {
    service: &'static str,
    title: &'static str,
    id: i32,
    fields: Vec<DetailField>,
}

struct FormField {
    name: &'static str,
    input_type: &'static str,
    required: bool,
    value: String,
}

#[derive(Template)]
#[template(path = "form.html")]
struct FormPage {
    service: &'static str,
    heading: String,
    action: String,
    fields: Vec<FormField>,
}

fn render<T: Template>(page: &T) -> Result<HttpResponse, GatewayError> {
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page.render()?))
}

fn redirect_to_list(service: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/{service}/")))
        .finish()
}

/// Flatten a JSON field into the string shown in a cell or input.
fn display(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn lookup(service: &str) -> Result<&'static ServiceSpec, GatewayError> {
    catalog::find(service).ok_or(GatewayError::UnknownService)
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /
pub async fn home() -> Result<HttpResponse, GatewayError> {
    render(&IndexPage {
        services: catalog::SERVICES,
    })
}

/// GET /{service}/
pub async fn list_page(
    upstream: web::Data<Upstream>,
    path: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    let svc = lookup(&path.into_inner())?;
    let items = upstream.list(svc.name).await?;

    let rows = items
        .iter()
        .map(|item| RowView {
            id: display(item.get("id")),
            cells: svc
                .columns
                .iter()
                .map(|column| display(item.get(*column)))
                .collect(),
        })
        .collect();

    render(&ListPage {
        service: svc.name,
        title: svc.title,
        columns: svc.columns,
        rows,
    })
}

/// GET /{service}/create
pub async fn create_form(path: web::Path<String>) -> Result<HttpResponse, GatewayError> {
    let svc = lookup(&path.into_inner())?;

    let fields = svc
        .fields
        .iter()
        .map(|f| FormField {
            name: f.name,
            input_type: f.input_type,
            required: f.required,
            value: String::new(),
        })
        .collect();

    render(&FormPage {
        service: svc.name,
        heading: format!("New {}", svc.name),
        action: format!("/{}/create", svc.name),
        fields,
    })
}

/// POST /{service}/create
pub async fn create_submit(
    upstream: web::Data<Upstream>,
    path: web::Path<String>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, GatewayError> {
    let svc = lookup(&path.into_inner())?;
    upstream
        .create(svc.name, form_to_json(&form.into_inner()))
        .await?;
    Ok(redirect_to_list(svc.name))
}

/// GET /{service}/{id}
pub async fn detail_page(
    upstream: web::Data<Upstream>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse, GatewayError> {
    let (service, id) = path.into_inner();
    let svc = lookup(&service)?;
    let item = upstream.fetch(svc.name, id).await?;

    let fields = svc
        .columns
        .iter()
        .map(|&column| DetailField {
            label: column,
            value: display(item.get(column)),
        })
        .collect();

    render(&DetailPage {
        service: svc.name,
        title: svc.title,
        id,
        fields,
    })
}

/// GET /{service}/edit/{id}
pub async fn edit_form(
    upstream: web::Data<Upstream>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse, GatewayError> {
    let (service, id) = path.into_inner();
    let svc = lookup(&service)?;
    let item = upstream.fetch(svc.name, id).await?;

    let fields = svc
        .fields
        .iter()
        .map(|f| FormField {
            name: f.name,
            input_type: f.input_type,
            required: f.required,
            value: display(item.get(f.name)),
        })
        .collect();

    render(&FormPage {
        service: svc.name,
        heading: format!("Edit {} #{id}", svc.name),
        action: format!("/{}/edit/{id}", svc.name),
        fields,
    })
}

/// POST /{service}/edit/{id}
pub async fn edit_submit(
    upstream: web::Data<Upstream>,
    path: web::Path<(String, i32)>,
    form: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, GatewayError> {
    let (service, id) = path.into_inner();
    let svc = lookup(&service)?;
    upstream
        .update(svc.name, id, form_to_json(&form.into_inner()))
        .await?;
    Ok(redirect_to_list(svc.name))
}

/// GET /{service}/delete/{id}
pub async fn delete_item(
    upstream: web::Data<Upstream>,
    path: web::Path<(String, i32)>,
) -> Result<HttpResponse, GatewayError> {
    let (service, id) = path.into_inner();
    let svc = lookup(&service)?;
    upstream.delete(svc.name, id).await?;
    Ok(redirect_to_list(svc.name))
}
