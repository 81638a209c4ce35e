use clap::Args;
use flowsense_contact::{
    CompanySize, ContactForm, Field, FormState, HttpTransport, SUCCESS_MESSAGE, SUCCESS_TITLE,
};

#[derive(Args)]
pub struct SubmitArgs {
    /// Site root serving /api/contact
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    endpoint: String,

    /// Page the submission is reported from (defaults to the site root)
    #[arg(long)]
    page_url: Option<String>,

    #[arg(long)]
    first_name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    company: Option<String>,

    /// One of 1-10, 11-50, 51-200, 201-500, 501-1000, 1001-5000, 5001+
    #[arg(long, value_parser = parse_company_size)]
    company_size: Option<CompanySize>,

    /// Job title
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    message: Option<String>,
}

fn parse_company_size(value: &str) -> Result<CompanySize, String> {
    value.parse().map_err(|_| {
        let allowed = CompanySize::options()
            .map(|(value, _)| value)
            .collect::<Vec<_>>()
            .join(", ");
        format!("expected one of {allowed}")
    })
}

pub async fn submit(args: SubmitArgs) -> anyhow::Result<()> {
    let transport = HttpTransport::new(&args.endpoint)?;
    let page_url = args.page_url.unwrap_or_else(|| args.endpoint.to_owned());

    let mut form = ContactForm::new();
    form.open();
    form.edit(Field::FirstName, args.first_name);
    form.edit(Field::Email, args.email);

    let optional = [
        (Field::LastName, args.last_name),
        (Field::Phone, args.phone),
        (Field::Company, args.company),
        (Field::CompanySize, args.company_size.map(|size| size.to_string())),
        (Field::Title, args.title),
        (Field::Message, args.message),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            form.edit(field, value);
        }
    }

    match form.submit(&transport, page_url).await? {
        FormState::Submitted { .. } => {
            tracing::info!(endpoint = transport.endpoint(), "{SUCCESS_TITLE} {SUCCESS_MESSAGE}");
            Ok(())
        }
        FormState::Failed { message, .. } => anyhow::bail!("{message}"),
        _ => anyhow::bail!("submission did not complete"),
    }
}
