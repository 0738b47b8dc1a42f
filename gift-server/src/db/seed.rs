//! Default catalog seed
//!
//! Idempotent: entries are upserted by slug, so re-running at startup only
//! refreshes copy and ordering and never duplicates rows or touches IDs.

use super::repository::RepoResult;
use sqlx::SqlitePool;

struct SeedGift {
    slug: &'static str,
    title: &'static str,
    strapline: &'static str,
    description: &'static str,
    led_by_name: &'static str,
    led_by_role: &'static str,
    duration: &'static str,
    format: &'static str,
    sort_order: i64,
}

const DEFAULT_CATALOG: &[SeedGift] = &[
    SeedGift {
        slug: "ai-opportunity-clinic",
        title: "AI Opportunity Clinic",
        strapline: "Discover how AI can transform your business operations",
        description: "An in-depth consultation to identify practical AI opportunities across \
            your organisation. We will map use cases, discuss implementation strategies, and \
            shape a roadmap that aligns with your commercial objectives.",
        led_by_name: "IMA Hybrid Experience",
        led_by_role: "Associate Director of Technology and team",
        duration: "90 minutes",
        format: "Virtual consultation",
        sort_order: 1,
    },
    SeedGift {
        slug: "experience-strategy-sprint",
        title: "Experience Strategy Sprint",
        strapline: "Reimagine your customer experience from the ground up",
        description: "A focused sprint to map customer journeys, surface friction points, and \
            prioritise the moments that matter. You will leave with an action plan to elevate \
            your experience across channels.",
        led_by_name: "IMA Hybrid Experience",
        led_by_role: "Experience Strategy Leadership team",
        duration: "2 hours",
        format: "In-person or hybrid workshop",
        sort_order: 2,
    },
    SeedGift {
        slug: "creative-automation-deep-dive",
        title: "Creative Automation Deep Dive",
        strapline: "Scale your creative output without sacrificing quality",
        description: "A working session to design creative automation workflows that maintain \
            brand guardrails while increasing throughput. We will review tooling, templates, \
            and governance to help you scale safely.",
        led_by_name: "IMA Hybrid Experience",
        led_by_role: "Creative Technology specialists",
        duration: "90 minutes",
        format: "Virtual demo and consultation",
        sort_order: 3,
    },
    SeedGift {
        slug: "retail-innovation-roundtable",
        title: "Retail Innovation Roundtable",
        strapline: "Explore the future of retail and commerce",
        description: "An invite-only roundtable on emerging retail trends, from phygital \
            experiences to social commerce. We will unpack case studies, discuss adoption \
            barriers, and identify opportunities for your roadmap.",
        led_by_name: "IMA Hybrid Experience",
        led_by_role: "Retail Strategy and Innovation leads",
        duration: "1 hour",
        format: "Virtual roundtable",
        sort_order: 4,
    },
    SeedGift {
        slug: "brand-measurement-lab",
        title: "Brand Measurement Lab",
        strapline: "Prove the value of your brand investments",
        description: "A practical lab session on measuring brand health and demonstrating ROI. \
            We will review your metrics, introduce advanced frameworks, and outline a dashboard \
            that ties brand to business outcomes.",
        led_by_name: "IMA Hybrid Experience",
        led_by_role: "Brand Analytics practice",
        duration: "90 minutes",
        format: "Virtual consultation",
        sort_order: 5,
    },
    SeedGift {
        slug: "future-customer-journeys",
        title: "Future of Customer Journeys Session",
        strapline: "Design experiences for tomorrow's consumers",
        description: "A forward-looking session on how ambient computing, predictive \
            personalisation, and ethical data use are reshaping journeys. We will stress-test \
            your roadmap against what is coming next.",
        led_by_name: "IMA Hybrid Experience",
        led_by_role: "Futures and Innovation team",
        duration: "75 minutes",
        format: "Virtual session",
        sort_order: 6,
    },
];

/// Upsert the default catalog by slug.
pub async fn seed_default_catalog(pool: &SqlitePool) -> RepoResult<()> {
    let now = shared::util::now_millis();
    for gift in DEFAULT_CATALOG {
        sqlx::query(
            "INSERT INTO gift (id, slug, title, strapline, description, led_by_name, \
                 led_by_role, duration, format, sort_order, is_active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1, ?11, ?11) \
             ON CONFLICT(slug) DO UPDATE SET title=excluded.title, \
                strapline=excluded.strapline, description=excluded.description, \
                led_by_name=excluded.led_by_name, led_by_role=excluded.led_by_role, \
                duration=excluded.duration, format=excluded.format, \
                sort_order=excluded.sort_order, updated_at=excluded.updated_at",
        )
        .bind(shared::util::new_id())
        .bind(gift.slug)
        .bind(gift.title)
        .bind(gift.strapline)
        .bind(gift.description)
        .bind(gift.led_by_name)
        .bind(gift.led_by_role)
        .bind(gift.duration)
        .bind(gift.format)
        .bind(gift.sort_order)
        .bind(now)
        .execute(pool)
        .await?;
    }
    tracing::info!(count = DEFAULT_CATALOG.len(), "Default catalog seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::gift;
    use crate::db::testing::memory_pool;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = memory_pool().await;
        seed_default_catalog(&pool).await.unwrap();
        let first = gift::find_all(&pool).await.unwrap();
        assert_eq!(first.len(), DEFAULT_CATALOG.len());

        seed_default_catalog(&pool).await.unwrap();
        let second = gift::find_all(&pool).await.unwrap();
        assert_eq!(second.len(), first.len());
        // IDs survive the re-seed
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.slug, b.slug);
        }
    }

    #[tokio::test]
    async fn test_seed_order_matches_sort_order() {
        let pool = memory_pool().await;
        seed_default_catalog(&pool).await.unwrap();
        let gifts = gift::find_active(&pool).await.unwrap();
        let orders: Vec<i64> = gifts.iter().map(|g| g.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);
    }
}
