//! Server-rendered HTML pages.
//!
//! Every user-supplied value goes through [`escape`] before it is placed in
//! markup.

use itertools::Itertools;

use crate::model::{Category, Garment, PopulatedGarment, Product, ProductForm};

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="/public/style.css">
</head>
<body>
    <nav><a href="/products">Products</a><a href="/garments">Garments</a></nav>
    <h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("Rp {:.0}", price)
    } else {
        format!("Rp {:.2}", price)
    }
}

fn product_rows(products: &[Product]) -> String {
    if products.is_empty() {
        return "    <p>No products yet.</p>".to_string();
    }
    let rows = products
        .iter()
        .map(|p| {
            format!(
                r#"        <tr><td><a href="/products/{id}">{name}</a></td><td>{brand}</td><td>{price}</td><td>{category}</td></tr>"#,
                id = p.id,
                name = escape(&p.name),
                brand = escape(&p.brand),
                price = format_price(p.price),
                category = p.category.map(|c| c.as_str()).unwrap_or("-"),
            )
        })
        .join("\n");
    format!(
        "    <table>\n        <tr><th>Name</th><th>Brand</th><th>Price</th><th>Category</th></tr>\n{}\n    </table>",
        rows
    )
}

pub fn home() -> String {
    layout(
        "Shop",
        r#"    <p>Manage the <a href="/products">product catalog</a> and the <a href="/garments">garments</a> that make them.</p>"#,
    )
}

/// `category_label` is the raw filter value, or `All` when no filter applies.
pub fn products_index(products: &[Product], category_label: &str) -> String {
    let filters = std::iter::once(r#"<a href="/products">All</a>"#.to_string())
        .chain(
            Category::ALL
                .iter()
                .map(|c| format!(r#"<a href="/products?category={0}">{0}</a>"#, c)),
        )
        .join(" | ");
    let body = format!(
        r#"    <p>Category: <strong>{label}</strong></p>
    <p>{filters}</p>
{rows}
    <p><a href="/products/create">Add product</a></p>"#,
        label = escape(category_label),
        filters = filters,
        rows = product_rows(products),
    );
    layout("Products", &body)
}

fn category_options(selected: Option<&str>) -> String {
    std::iter::once(r#"<option value="">-</option>"#.to_string())
        .chain(Category::ALL.iter().map(|c| {
            let attr = if selected == Some(c.as_str()) { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, c, attr)
        }))
        .join("")
}

fn product_fields(values: &ProductForm) -> String {
    let text = |label: &str, name: &str, value: &Option<String>| {
        format!(
            r#"        <label>{label} <input type="text" name="{name}" value="{value}"></label>"#,
            label = label,
            name = name,
            value = escape(value.as_deref().unwrap_or(""))
        )
    };
    [
        text("Name", "name", &values.name),
        text("Brand", "brand", &values.brand),
        text("Price", "price", &values.price),
        text("Color", "color", &values.color),
        format!(
            r#"        <label>Category <select name="category">{}</select></label>"#,
            category_options(values.category.as_deref())
        ),
    ]
    .join("\n")
}

pub fn product_form(title: &str, action: &str, values: &ProductForm) -> String {
    let body = format!(
        r#"    <form action="{action}" method="POST">
{fields}
        <button type="submit">Save</button>
    </form>"#,
        action = escape(action),
        fields = product_fields(values),
    );
    layout(title, &body)
}

pub fn product_show(product: &Product, garment: Option<&Garment>) -> String {
    let owner = match garment {
        Some(g) => format!(
            r#"    <p>Made by <a href="/garments/{}">{}</a></p>"#,
            g.id,
            escape(&g.name)
        ),
        None => String::new(),
    };
    let body = format!(
        r#"    <ul>
        <li>Brand: {brand}</li>
        <li>Price: {price}</li>
        <li>Color: {color}</li>
        <li>Category: {category}</li>
    </ul>
{owner}
    <p><a href="/products/{id}/edit">Edit</a></p>
    <form class="inline" action="/products/{id}?_method=DELETE" method="POST">
        <button type="submit">Delete</button>
    </form>"#,
        brand = escape(&product.brand),
        price = format_price(product.price),
        color = escape(&product.color),
        category = product.category.map(|c| c.as_str()).unwrap_or("-"),
        owner = owner,
        id = product.id,
    );
    layout(&product.name, &body)
}

pub fn garments_index(garments: &[Garment]) -> String {
    let items = if garments.is_empty() {
        "    <p>No garments yet.</p>".to_string()
    } else {
        let items = garments
            .iter()
            .map(|g| {
                format!(
                    r#"        <li><a href="/garments/{}">{}</a> ({} products)</li>"#,
                    g.id,
                    escape(&g.name),
                    g.products.len()
                )
            })
            .join("\n");
        format!("    <ul>\n{}\n    </ul>", items)
    };
    let body = format!(
        "{}\n    <p><a href=\"/garments/create\">Add garment</a></p>",
        items
    );
    layout("Garments", &body)
}

pub fn garment_form() -> String {
    layout(
        "New garment",
        r#"    <form action="/garments" method="POST">
        <label>Name <input type="text" name="name"></label>
        <label>Location <input type="text" name="location"></label>
        <label>Contact <input type="text" name="contact"></label>
        <button type="submit">Save</button>
    </form>"#,
    )
}

pub fn garment_show(populated: &PopulatedGarment) -> String {
    let garment = &populated.garment;
    let body = format!(
        r#"    <ul>
        <li>Location: {location}</li>
        <li>Contact: {contact}</li>
    </ul>
    <h2>Products</h2>
{rows}
    <p><a href="/garments/{id}/products/create">Add product</a></p>
    <form class="inline" action="/garments/{id}?_method=DELETE" method="POST">
        <button type="submit">Delete garment and its products</button>
    </form>"#,
        location = escape(garment.location.as_deref().unwrap_or("-")),
        contact = escape(&garment.contact),
        rows = product_rows(&populated.products),
        id = garment.id,
    );
    layout(&garment.name, &body)
}

pub fn garment_product_form(garment: &Garment) -> String {
    product_form(
        &format!("New product for {}", garment.name),
        &format!("/garments/{}/products", garment.id),
        &ProductForm::default(),
    )
}
