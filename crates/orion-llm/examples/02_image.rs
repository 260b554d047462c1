use anyhow::Result;
use orion_llm::{ImageClient, ImageRequest, OpenAIClient};

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY")?;
    let client = OpenAIClient::new(api_key)?;

    let request = ImageRequest::new("dall-e-3", "A lighthouse on a cliff at dusk, oil painting");
    let response = client.generate_image(request).await?;

    match response.first_url() {
        Some(url) => println!("Image: {}", url),
        None => println!("No image returned"),
    }

    Ok(())
}
