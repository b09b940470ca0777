//! Test fixtures for seeding the in-memory datastore.
//!
//! These go through the store traits directly, bypassing domain rules, so
//! each test can assemble exactly the state it needs.

use anyhow::Result;
use chrono::{Duration, Utc};

use gather_core::common::{HostId, MeetingId, UserId};
use gather_core::domains::accounts::models::{Host, User};
use gather_core::domains::meetings::models::{Meeting, NewMeeting, Participation};
use gather_core::domains::reviews::models::{NewReview, Review};
use gather_core::store::Datastore;

pub fn host_id(n: u32) -> HostId {
    HostId::new(format!("host-{n}"))
}

pub fn user_id(n: u32) -> UserId {
    UserId::new(format!("user-{n}"))
}

pub async fn seed_host(db: &dyn Datastore, n: u32) -> Result<Host> {
    let host = Host {
        id: host_id(n),
        nickname: format!("Host {n}"),
    };
    Ok(db.upsert_host(host).await?)
}

pub async fn seed_user(db: &dyn Datastore, n: u32) -> Result<User> {
    let user = User {
        id: user_id(n),
        nickname: format!("User {n}"),
    };
    Ok(db.upsert_user(user).await?)
}

/// Meeting whose join deadline is still a week out.
pub async fn create_open_meeting(
    db: &dyn Datastore,
    host: &HostId,
    title: &str,
) -> Result<Meeting> {
    let now = Utc::now();
    let meeting = db
        .insert_meeting(
            NewMeeting::builder()
                .host_id(host.clone())
                .title(title)
                .content(format!("{title} details"))
                .start_at(now + Duration::days(7))
                .end_at(now + Duration::days(7) + Duration::hours(2))
                .deadline(now + Duration::days(6))
                .max_participants(10)
                .place("Community hall")
                .build(),
        )
        .await?;
    Ok(meeting)
}

/// Meeting whose join deadline has already passed.
pub async fn create_closed_meeting(
    db: &dyn Datastore,
    host: &HostId,
    title: &str,
) -> Result<Meeting> {
    let now = Utc::now();
    let meeting = db
        .insert_meeting(
            NewMeeting::builder()
                .host_id(host.clone())
                .title(title)
                .content(format!("{title} details"))
                .start_at(now - Duration::days(1))
                .end_at(now - Duration::days(1) + Duration::hours(2))
                .deadline(now - Duration::days(2))
                .max_participants(10)
                .place("Community hall")
                .build(),
        )
        .await?;
    Ok(meeting)
}

/// Seed `count` open meetings for one host, in insertion order.
pub async fn seed_meetings(
    db: &dyn Datastore,
    host: &HostId,
    count: usize,
) -> Result<Vec<Meeting>> {
    let mut meetings = Vec::with_capacity(count);
    for n in 1..=count {
        meetings.push(create_open_meeting(db, host, &format!("Meeting {n}")).await?);
    }
    Ok(meetings)
}

/// Register the user for a meeting.
pub async fn join(
    db: &dyn Datastore,
    meeting_id: MeetingId,
    user: &UserId,
) -> Result<Participation> {
    Ok(db.insert_participation(meeting_id, user.clone()).await?)
}

/// Register the user and mark them attended, making them review-eligible.
pub async fn join_and_attend(
    db: &dyn Datastore,
    meeting_id: MeetingId,
    user: &UserId,
) -> Result<()> {
    db.insert_participation(meeting_id, user.clone()).await?;
    db.set_attended(meeting_id, user).await?;
    Ok(())
}

/// Insert a review directly, bypassing the attendance rule.
pub async fn create_review(
    db: &dyn Datastore,
    meeting_id: MeetingId,
    author: &UserId,
    title: &str,
) -> Result<Review> {
    let review = db
        .insert_review(
            NewReview::builder()
                .meeting_id(meeting_id)
                .author_id(author.clone())
                .title(title)
                .content(format!("{title} content"))
                .build(),
        )
        .await?;
    Ok(review)
}
