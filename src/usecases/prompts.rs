//! Prompt templates. Pure string assembly from validated requests.

use crate::domain::{BlogCategory, BlogRequest, BuildRequest, ChatRequest};

/// Components every build recommendation lists, in order.
const BUILD_COMPONENTS: [&str; 8] = [
    "CPU",
    "GPU",
    "Motherboard",
    "RAM",
    "Storage",
    "PSU",
    "Case",
    "Cooling",
];

/// Amazon product link carrying the affiliate tag. `PRODUCT_ID` is filled in by the model.
fn affiliate_link(affiliate_tag: &str) -> String {
    format!("https://www.amazon.com/dp/PRODUCT_ID?tag={}", affiliate_tag)
}

/// "gaming pc" -> "Gaming Pc".
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Structured markdown PC-build recommendation prompt.
pub fn build_prompt(request: &BuildRequest, affiliate_tag: &str) -> String {
    let additional = request
        .additional_requirements
        .as_deref()
        .filter(|extra| !extra.trim().is_empty())
        .map(|extra| format!("\n- Additional requirements: {}", extra.trim()))
        .unwrap_or_default();

    let mut components = String::new();
    for component in BUILD_COMPONENTS {
        components.push_str(&format!(
            "**{}**: [Product Name] - $[price]\n*Reason: [brief reason for choice]*\n\n",
            component
        ));
    }

    let link = affiliate_link(affiliate_tag);

    format!(
        r#"You are an expert PC builder assistant. Create a detailed PC build recommendation.

REQUIREMENTS:
- Budget: ${budget} {currency}
- Use case: {use_case}
- Be specific with actual product names and current pricing{additional}

FORMAT YOUR RESPONSE EXACTLY LIKE THIS:

# ${budget} {title} PC Build

## Components:

{components}## Build Summary:
- **Total Cost**: $[total]
- **Performance**: [brief performance summary]
- **Upgrade Path**: [brief upgrade suggestions]

## Amazon Links:
- CPU: [Product Name]({link})
- GPU: [Product Name]({link})
- [Continue for all components...]

Use real, current products available on Amazon. Ensure total stays within budget."#,
        budget = request.budget,
        currency = request.currency.trim(),
        use_case = request.use_case.trim(),
        title = title_case(&request.use_case),
    )
}

/// Q&A prompt. Includes the user's current build when one is supplied.
pub fn chat_prompt(request: &ChatRequest) -> String {
    let context = request
        .build_context
        .as_deref()
        .filter(|ctx| !ctx.trim().is_empty())
        .map(|ctx| {
            format!(
                "\nCurrent build context (the user is asking about this build):\n{}\n",
                ctx.trim()
            )
        })
        .unwrap_or_default();

    format!(
        r#"You are an expert PC builder assistant. Answer the user's question about PC components, compatibility, or building advice.
{context}
Question: {question}

Please provide a helpful, accurate response about PC building."#,
        question = request.message.trim(),
    )
}

/// Blog post prompt: a build guide or an informative article.
pub fn blog_prompt(request: &BlogRequest, affiliate_tag: &str) -> String {
    let topic = request.topic.trim();
    match request.category {
        BlogCategory::Build => {
            let budget = request
                .budget
                .map(|b| format!("\n- Budget: ${} USD", b))
                .unwrap_or_default();
            let use_case = request
                .use_case
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .map(|u| format!("\n- Use case: {}", u.trim()))
                .unwrap_or_default();
            format!(
                r#"You are an expert PC hardware writer. Write a blog post presenting a complete PC build.

TOPIC: {topic}{budget}{use_case}

Write in markdown with:
# [Catchy title]
## Introduction
## The Build (one subsection per component: {components}, each with product name, price and why it was chosen)
## Performance Expectations
## Upgrade Path
## Conclusion

Link each product as [Product Name]({link}).
Use real, current products and keep prices realistic."#,
                components = BUILD_COMPONENTS.join(", "),
                link = affiliate_link(affiliate_tag),
            )
        }
        BlogCategory::Article => format!(
            r#"You are an expert PC hardware writer. Write an informative blog article.

TOPIC: {topic}

Write in markdown with:
# [Engaging title]
## Introduction
## 3-5 sections covering the topic in depth, with practical advice
## Key Takeaways (bullet list)
## Conclusion

Be accurate and current; explain jargon for beginners."#
        ),
    }
}
