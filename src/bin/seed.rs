// Seed utility: creates the first superadmin and loads a starter set of
// schemes. Mirrors what the setup endpoint and admin UI would do, but from
// the command line for fresh deployments.
use anyhow::Result;
use clap::{Parser, Subcommand};

use agrischemes_api::auth::password;
use agrischemes_api::config::AppConfig;
use agrischemes_api::database::models::admin::ROLE_SUPERADMIN;
use agrischemes_api::database::models::scheme::SchemeInput;
use agrischemes_api::database::{self, AdminStore, SchemeStore};

#[derive(Parser)]
#[command(name = "seed", about = "Seed the AgriSchemes database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a superadmin account
    Admin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Insert the bundled sample schemes
    Schemes {
        /// Remove all existing schemes first
        #[arg(long)]
        drop: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let pool = database::connect(&config.database).await?;
    database::schema::ensure_schema(&pool).await?;

    match cli.command {
        Command::Admin {
            username,
            email,
            password: plain,
        } => {
            let admins = AdminStore::new(pool.clone());
            let hash = password::hash_password(plain, config.security.bcrypt_cost)
                .await
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            let admin = admins
                .create(&username, &email, &hash, ROLE_SUPERADMIN)
                .await?;
            println!("created superadmin {} <{}>", admin.username, admin.email);
        }
        Command::Schemes { drop } => {
            if drop {
                let deleted = sqlx::query("DELETE FROM schemes")
                    .execute(&pool)
                    .await?
                    .rows_affected();
                println!("removed {} existing schemes", deleted);
            }

            let schemes = SchemeStore::new(pool.clone());
            let samples = sample_schemes();
            let total = samples.len();
            for input in &samples {
                input
                    .validate()
                    .map_err(|e| anyhow::anyhow!("invalid sample: {:?}", e.fields()))?;
                let scheme = schemes.create(input).await?;
                println!("  + {} ({})", scheme.name, scheme.category);
            }
            println!("{} schemes inserted", total);
        }
    }

    pool.close().await;
    Ok(())
}

fn sample(
    name: &str,
    short: &str,
    description: &str,
    link: &str,
    category: &str,
    ministry: &str,
    eligibility: &str,
    benefits: &str,
) -> SchemeInput {
    SchemeInput {
        name: name.into(),
        short_description: short.into(),
        description: description.into(),
        official_link: link.into(),
        category: category.into(),
        ministry: ministry.into(),
        eligibility: eligibility.into(),
        benefits: benefits.into(),
        ..Default::default()
    }
}

fn sample_schemes() -> Vec<SchemeInput> {
    vec![
        sample(
            "PM-KISAN Samman Nidhi",
            "Income support of Rs. 6,000 per year to all landholding farmer families.",
            "Under PM-KISAN, an amount of Rs. 6,000 per year is transferred in three equal \
             four-monthly installments of Rs. 2,000 directly into the bank accounts of \
             landholding farmer families, subject to certain exclusion criteria.",
            "https://pmkisan.gov.in",
            "Subsidy",
            "Ministry of Agriculture and Farmers Welfare",
            "All landholding farmer families with cultivable land in their names.",
            "Rs. 6,000 per year in three installments via direct benefit transfer.",
        ),
        sample(
            "Pradhan Mantri Fasal Bima Yojana",
            "Crop insurance against natural calamities, pests and diseases.",
            "PMFBY provides comprehensive insurance coverage against failure of the crop, \
             helping to stabilise the income of farmers. Premium rates are 2% for kharif, \
             1.5% for rabi food and oilseed crops, and 5% for commercial crops.",
            "https://pmfby.gov.in",
            "Insurance",
            "Ministry of Agriculture and Farmers Welfare",
            "All farmers growing notified crops in notified areas, including sharecroppers \
             and tenant farmers.",
            "Insurance cover for the full sum insured with a low uniform premium.",
        ),
        sample(
            "Kisan Credit Card",
            "Short-term credit for cultivation and allied activities at concessional rates.",
            "The KCC scheme provides adequate and timely credit support from the banking \
             system under a single window with a simplified procedure for cultivation \
             expenses, post-harvest costs, and maintenance of farm assets.",
            "https://www.india.gov.in/spotlight/kisan-credit-card-kcc",
            "Loan",
            "Ministry of Finance",
            "Farmers, sharecroppers, tenant farmers, and self-help groups engaged in \
             agriculture or allied activities.",
            "Credit up to Rs. 3 lakh at subsidised interest with flexible repayment.",
        ),
        sample(
            "Soil Health Card Scheme",
            "Soil testing and crop-wise nutrient recommendations for every farm holding.",
            "The scheme issues soil health cards to farmers every two years carrying \
             crop-wise recommendations of nutrients and fertilisers required for \
             individual farms, promoting balanced use of inputs.",
            "https://soilhealth.dac.gov.in",
            "Training",
            "Ministry of Agriculture and Farmers Welfare",
            "All farmers with agricultural land.",
            "Free soil testing and tailored fertiliser recommendations.",
        ),
        sample(
            "Paramparagat Krishi Vikas Yojana",
            "Cluster-based support for organic farming certification and marketing.",
            "PKVY promotes organic farming through adoption of organic villages by cluster \
             approach and Participatory Guarantee System certification, with financial \
             assistance spread over three years per hectare.",
            "https://pgsindia-ncof.gov.in",
            "Organic Farming",
            "Ministry of Agriculture and Farmers Welfare",
            "Farmers willing to take up certified organic farming in clusters of 20 hectares.",
            "Rs. 50,000 per hectare over three years including organic inputs and certification.",
        ),
        sample(
            "Pradhan Mantri Krishi Sinchayee Yojana",
            "Expanding irrigation coverage and improving water-use efficiency.",
            "PMKSY focuses on end-to-end solutions in the irrigation supply chain: water \
             sources, distribution networks, and farm-level applications such as drip and \
             sprinkler systems under the Per Drop More Crop component.",
            "https://pmksy.gov.in",
            "Irrigation",
            "Ministry of Jal Shakti",
            "All farmers; priority to small and marginal farmers and water-stressed districts.",
            "Subsidy of up to 55% for micro-irrigation systems for small and marginal farmers.",
        ),
        sample(
            "e-NAM National Agriculture Market",
            "Online trading platform integrating agricultural produce markets.",
            "e-NAM networks existing APMC mandis into a unified national market for \
             agricultural commodities, enabling transparent price discovery and online \
             payment directly to farmers.",
            "https://enam.gov.in",
            "Market Support",
            "Ministry of Agriculture and Farmers Welfare",
            "Farmers, traders, and buyers registered with integrated APMC mandis.",
            "Better price discovery, reduced intermediaries, and direct online payments.",
        ),
        sample(
            "Sub-Mission on Agricultural Mechanization",
            "Subsidised farm machinery and custom hiring centres for small holdings.",
            "SMAM provides financial assistance for the purchase of agricultural machinery \
             and establishes custom hiring centres to make high-value equipment accessible \
             to small and marginal farmers.",
            "https://agrimachinery.nic.in",
            "Equipment",
            "Ministry of Agriculture and Farmers Welfare",
            "Individual farmers, cooperative societies, FPOs, and rural entrepreneurs.",
            "40-50% subsidy on machinery purchase; 80% assistance for custom hiring centres.",
        ),
    ]
}
