use criterion::{
    criterion_group, criterion_main, AxisScale, BenchmarkId, Criterion, PlotConfiguration,
    Throughput,
};
use nav_pathing::PathFinder;
use nav_test_utils::{random_points, random_squares, NumPoints};

const MAP_SIZE: f64 = 1000.;
const OBSTACLE_HALF_SIZE: f64 = 5.;
const INFLATE_MARGIN: f64 = 1.;

fn rebuild_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);

    for num_obstacles in [NumPoints::Ten, NumPoints::OneHundred] {
        let polygons = random_squares(num_obstacles, MAP_SIZE, OBSTACLE_HALF_SIZE, 1);
        let mut finder = PathFinder::new();

        group.throughput(Throughput::Elements(1));
        group.bench_function(
            BenchmarkId::from_parameter(usize::from(num_obstacles)),
            |b| {
                b.iter(|| {
                    finder.rebuild(&polygons, INFLATE_MARGIN);
                });
            },
        );
    }
}

fn set_external_points_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_external_points");
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);

    let points = random_points(NumPoints::OneHundred, MAP_SIZE, 2);

    for num_obstacles in [NumPoints::Ten, NumPoints::OneHundred] {
        let polygons = random_squares(num_obstacles, MAP_SIZE, OBSTACLE_HALF_SIZE, 1);
        let mut finder = PathFinder::from_polygons(&polygons, INFLATE_MARGIN);
        let mut index = 0;

        group.throughput(Throughput::Elements(1));
        group.bench_function(
            BenchmarkId::from_parameter(usize::from(num_obstacles)),
            |b| {
                b.iter(|| {
                    let start = points[index];
                    index = (index + 1) % points.len();
                    let target = points[index];
                    index = (index + 1) % points.len();
                    finder.set_external_points(&[start, target]);
                });
            },
        );
    }
}

fn find_path_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_path");
    let plot_config = PlotConfiguration::default().summary_scale(AxisScale::Logarithmic);
    group.plot_config(plot_config);

    let points = random_points(NumPoints::OneHundred, MAP_SIZE, 3);

    for num_obstacles in [NumPoints::Ten, NumPoints::OneHundred] {
        let polygons = random_squares(num_obstacles, MAP_SIZE, OBSTACLE_HALF_SIZE, 1);
        let mut finder = PathFinder::from_polygons(&polygons, INFLATE_MARGIN);
        finder.set_external_points(&points);
        let points = finder.external_points().to_vec();
        let mut index = 0;

        group.throughput(Throughput::Elements(1));
        group.bench_function(
            BenchmarkId::from_parameter(usize::from(num_obstacles)),
            |b| {
                b.iter(|| {
                    let start = points[index];
                    index = (index + 1) % points.len();
                    let target = points[index];
                    index = (index + 1) % points.len();
                    finder.find_path(start, target);
                });
            },
        );
    }
}

criterion_group!(
    benches,
    rebuild_benchmark,
    set_external_points_benchmark,
    find_path_benchmark
);
criterion_main!(benches);
