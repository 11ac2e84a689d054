// Criterion benchmarks for Relief Alloc

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use relief_alloc::core::{distance::haversine_distance, find_nearest_available, select_assignee};
use relief_alloc::models::{
    Availability, Coordinate, Shelter, SkillSet, SkillTag, Task, TaskPriority, TaskStatus, Volunteer,
};
use chrono::Utc;

const SKILLS: [SkillTag; 9] = [
    SkillTag::FirstAid,
    SkillTag::Driving,
    SkillTag::Cooking,
    SkillTag::Rescue,
    SkillTag::Logistics,
    SkillTag::Medical,
    SkillTag::Counseling,
    SkillTag::Communication,
    SkillTag::Construction,
];

fn create_shelter(id: usize, lat: f64, lon: f64) -> Shelter {
    Shelter {
        id: id.to_string(),
        name: format!("Shelter {}", id),
        address: String::new(),
        city: "Mumbai".to_string(),
        state: "Maharashtra".to_string(),
        pincode: String::new(),
        location: Coordinate::new(lat, lon),
        total_capacity: 100,
        // Every fifth shelter is full
        current_occupancy: if id % 5 == 0 { 100 } else { (id % 100) as u32 },
        contact_number: String::new(),
        manager_name: String::new(),
        manager_contact: String::new(),
        coordinator_id: String::new(),
        created_at: Utc::now(),
    }
}

fn create_volunteer(id: usize) -> Volunteer {
    let skills: SkillSet = SKILLS
        .iter()
        .enumerate()
        .filter(|(i, _)| (id + i) % 3 == 0)
        .map(|(_, s)| *s)
        .collect();

    Volunteer {
        id: id.to_string(),
        user_id: format!("user-{}", id),
        name: format!("Volunteer {}", id),
        contact_number: String::new(),
        city: "Mumbai".to_string(),
        skills,
        availability: if id % 4 == 0 { Availability::Busy } else { Availability::Available },
        location: Coordinate::new(19.07, 72.88),
        profile_completed: id % 7 != 0,
        created_at: Utc::now(),
    }
}

fn create_task() -> Task {
    Task {
        id: "bench".to_string(),
        title: "Evacuation support".to_string(),
        description: String::new(),
        priority: TaskPriority::High,
        status: TaskStatus::Created,
        shelter_id: "1".to_string(),
        shelter_name: "Shelter 1".to_string(),
        assigned_volunteer_id: None,
        assigned_volunteer_name: None,
        required_skills: SkillSet::from([SkillTag::Rescue, SkillTag::FirstAid, SkillTag::Driving]),
        ai_assigned: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(19.0760),
                black_box(72.8777),
                black_box(19.0596),
                black_box(72.8295),
            )
        });
    });
}

fn bench_nearest_shelter(c: &mut Criterion) {
    let query = Coordinate::new(19.0760, 72.8777);
    let mut group = c.benchmark_group("find_nearest_available");

    for shelter_count in [10, 100, 1000, 10000].iter() {
        let shelters: Vec<Shelter> = (0..*shelter_count)
            .map(|i| {
                let lat_offset = (i as f64 * 0.001) % 0.5;
                let lon_offset = (i as f64 * 0.0007) % 0.5;
                create_shelter(i, 18.9 + lat_offset, 72.7 + lon_offset)
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(shelter_count),
            shelter_count,
            |b, _| {
                b.iter(|| find_nearest_available(black_box(&query), black_box(&shelters)));
            },
        );
    }

    group.finish();
}

fn bench_select_assignee(c: &mut Criterion) {
    let task = create_task();
    let mut group = c.benchmark_group("select_assignee");

    for volunteer_count in [10, 100, 1000, 10000].iter() {
        let volunteers: Vec<Volunteer> = (0..*volunteer_count).map(create_volunteer).collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(volunteer_count),
            volunteer_count,
            |b, _| {
                b.iter(|| select_assignee(black_box(&task), black_box(&volunteers)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_nearest_shelter,
    bench_select_assignee
);

criterion_main!(benches);
