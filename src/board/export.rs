use crate::board::types::Idea;

const CSV_HEADER: &str =
    "id,title,category,author,likes,dislikes,createdAt,description,adminResponse";

/// Render the collection as a CSV document in its current in-memory order.
/// Every field is quoted; embedded quotes are escaped by doubling.
pub fn export_csv(ideas: &[Idea]) -> String {
    let mut out = String::with_capacity(ideas.len() * 128 + CSV_HEADER.len());
    out.push_str(CSV_HEADER);
    out.push('\n');

    for idea in ideas {
        let fields = [
            idea.id.as_str(),
            idea.title.as_str(),
            idea.category.as_str(),
            idea.author.as_str(),
            &idea.likes.to_string(),
            &idea.dislikes.to_string(),
            &idea.created_at.to_rfc3339(),
            idea.description.as_str(),
            idea.admin_response.as_deref().unwrap_or(""),
        ]
        .map(quote_field);

        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
