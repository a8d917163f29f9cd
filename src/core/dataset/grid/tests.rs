#[cfg(test)]
mod tests {
    use std::fs::{create_dir_all, File};

    use float_cmp::approx_eq;
    use ndarray::{concatenate, s, Array, Array3, Array4, Axis};
    use ndarray_npy::WriteNpyExt;
    use rand::{Rng, SeedableRng};
    use tempfile::TempDir;

    use crate::constants::{FLOW_DATA_FILE, HOURS_PER_DAY, KEY_CLOSENESS, POI_DATA_FILE};
    use crate::core::dataset::grid::{GridConfig, NycBikeDataset};
    use crate::core::dataset::Dataset;
    use crate::core::features::{NormalizationRange, Scale, Split};
    use crate::error::DatasetError;

    const HEIGHT: usize = 4;
    const WIDTH: usize = 3;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn random_flow(len_total: usize, seed: u64) -> Array4<f64> {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        Array::from_shape_simple_fn((len_total, 2, HEIGHT, WIDTH), || rng.gen_range(0..200) as f64)
    }

    fn random_poi(seed: u64) -> Array3<f64> {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
        Array::from_shape_simple_fn((5, HEIGHT, WIDTH), || rng.gen_range(1..50) as f64)
    }

    fn example_config(split: Split) -> GridConfig {
        GridConfig::default()
            .with_split(split)
            .with_len_test(100)
            .with_closeness(3, 1)
            .with_period(2, 24)
            .with_trend(1, 168)
    }

    #[test]
    fn test_split_lengths() {
        init_logger();
        let flow = random_flow(1000, 42);
        let poi = random_poi(7);

        let train = NycBikeDataset::from_arrays(flow.clone(), poi.clone(), &example_config(Split::Train)).unwrap();
        let test = NycBikeDataset::from_arrays(flow.clone(), poi, &example_config(Split::Test)).unwrap();

        assert_eq!(train.skip_hours(), 168);
        assert_eq!(train.cardinality(), 732);
        assert_eq!(test.cardinality(), 100);
        assert_eq!(train.t_data().dim().0, 732);
        assert_eq!(train.p_data().dim().0, 732);
        assert_eq!(test.x_trend().unwrap().dim().0, 100);

        // Together the splits are exactly the windowed range, in order.
        let normalization = NormalizationRange::fit(&flow).unwrap();
        let expected = normalization.normalize_array(&flow.slice(s![168.., .., .., ..]));
        let joined = concatenate(Axis(0), &[train.y_data().view(), test.y_data().view()]).unwrap();
        assert_eq!(joined, expected);
    }

    #[test]
    fn test_sample_alignment() {
        init_logger();
        let flow = random_flow(600, 3);
        let config = example_config(Split::Test);
        let data = NycBikeDataset::from_arrays(flow.clone(), random_poi(5), &config).unwrap();
        let normalized = data.normalization().normalize_array(&flow);

        let first_test_step = 600 - 100;
        for index in [0, 1, 50, 99] {
            let sample = data.get(index).unwrap();
            let t = first_test_step + index;

            assert_eq!(sample.y_data, normalized.index_axis(Axis(0), t));

            for spec in config.scale_specs() {
                let window = sample.window(spec.scale).unwrap();
                assert_eq!(window.dim(), (2 * spec.len, HEIGHT, WIDTH));
                for k in 1..=spec.len {
                    assert_eq!(
                        window.slice(s![2 * (k - 1)..2 * k, .., ..]),
                        normalized.index_axis(Axis(0), t - spec.stride * k),
                    );
                }
            }

            let hour = t % 24;
            let day = (t / 24) % 7;
            assert!(sample.t_data.index_axis(Axis(0), hour).iter().all(|&v| v == 1.));
            assert!(sample.t_data.index_axis(Axis(0), HOURS_PER_DAY + day).iter().all(|&v| v == 1.));
            assert_eq!(sample.t_data.sum(), (2 * HEIGHT * WIDTH) as f64);

            assert!(sample.p_data.iter().all(|&v| v > 0. && v <= 1.));
        }
    }

    #[test]
    fn test_denormalize_targets() {
        let flow = random_flow(400, 11);
        let data = NycBikeDataset::from_arrays(flow.clone(), random_poi(1), &example_config(Split::Train)).unwrap();

        assert!(approx_eq!(f64, data.min_max_diff(), data.normalization().diff()));
        let restored = data.normalization().denormalize_array(data.y_data());
        for (&a, &b) in restored.iter().zip(flow.slice(s![168.., .., .., ..]).iter()) {
            assert!(approx_eq!(f64, a, b, epsilon = 1e-9));
        }
    }

    #[test]
    fn test_absent_closeness() {
        let config = example_config(Split::Train).with_closeness(0, 1);
        let data = NycBikeDataset::from_arrays(random_flow(400, 2), random_poi(2), &config).unwrap();

        assert!(data.x_closeness().is_none());
        let record = data.get(0).unwrap();
        assert!(record.x_closeness.is_none());

        let map = record.into_map();
        assert!(!map.contains_key(KEY_CLOSENESS));
        assert_eq!(
            map.keys().copied().collect::<Vec<_>>(),
            vec!["p_data", "t_data", "x_period", "x_trend", "y_data"]
        );
    }

    #[test]
    fn test_full_record_keys() {
        let data =
            NycBikeDataset::from_arrays(random_flow(400, 9), random_poi(9), &example_config(Split::Train)).unwrap();
        let map = data.get(3).unwrap().into_map();
        assert_eq!(map.len(), 6);
        assert_eq!(map["x_closeness"].dim(), (6, HEIGHT, WIDTH));
        assert_eq!(map["x_period"].dim(), (4, HEIGHT, WIDTH));
        assert_eq!(map["x_trend"].dim(), (2, HEIGHT, WIDTH));
        assert_eq!(map["t_data"].dim(), (31, HEIGHT, WIDTH));
        assert_eq!(map["p_data"].dim(), (5, HEIGHT, WIDTH));
        assert_eq!(map["y_data"].dim(), (2, HEIGHT, WIDTH));
    }

    #[test]
    fn test_index_out_of_range() {
        let data =
            NycBikeDataset::from_arrays(random_flow(400, 4), random_poi(4), &example_config(Split::Test)).unwrap();
        assert!(data.get(99).is_ok());
        assert!(matches!(
            data.get(100),
            Err(DatasetError::IndexOutOfRange { index: 100, cardinality: 100 })
        ));
    }

    #[test]
    fn test_construction_errors() {
        let poi = random_poi(0);

        let constant = Array4::<f64>::from_elem((400, 2, HEIGHT, WIDTH), 3.);
        assert!(matches!(
            NycBikeDataset::from_arrays(constant, poi.clone(), &example_config(Split::Train)),
            Err(DatasetError::NumericalDegeneracy(_))
        ));

        let disabled = example_config(Split::Train)
            .with_closeness(0, 1)
            .with_period(0, 24)
            .with_trend(0, 168);
        assert!(matches!(
            NycBikeDataset::from_arrays(random_flow(400, 0), poi.clone(), &disabled),
            Err(DatasetError::InvalidWindowConfig(_))
        ));

        // A JSON config can carry lengths whose horizon overflows usize.
        let overflowing = example_config(Split::Train).with_trend(usize::MAX / 2, 168);
        assert!(matches!(
            NycBikeDataset::from_arrays(random_flow(400, 0), poi.clone(), &overflowing),
            Err(DatasetError::InvalidWindowConfig(_))
        ));
        let whole_series = example_config(Split::Train).with_len_test(usize::MAX);
        assert!(matches!(
            NycBikeDataset::from_arrays(random_flow(400, 0), poi.clone(), &whole_series),
            Err(DatasetError::InsufficientHistory { needed: usize::MAX, available: 232 })
        ));

        // 400 - 168 = 232 windows cannot hold a 232-step test split.
        let greedy = example_config(Split::Train).with_len_test(232);
        assert!(matches!(
            NycBikeDataset::from_arrays(random_flow(400, 0), poi.clone(), &greedy),
            Err(DatasetError::InsufficientHistory { .. })
        ));

        let mut zero_channel = poi.clone();
        zero_channel.index_axis_mut(Axis(0), 2).fill(0.);
        assert!(matches!(
            NycBikeDataset::from_arrays(random_flow(400, 0), zero_channel, &example_config(Split::Train)),
            Err(DatasetError::NumericalDegeneracy(_))
        ));

        let mut negative_channel = poi.clone();
        negative_channel[[1, 0, 0]] = -1.;
        assert!(matches!(
            NycBikeDataset::from_arrays(random_flow(400, 0), negative_channel, &example_config(Split::Train)),
            Err(DatasetError::NumericalDegeneracy(_))
        ));

        let wrong_grid = Array3::<f64>::ones((5, HEIGHT + 1, WIDTH));
        assert!(matches!(
            NycBikeDataset::from_arrays(random_flow(400, 0), wrong_grid, &example_config(Split::Train)),
            Err(DatasetError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_load_from_root() {
        init_logger();
        let tmp = TempDir::new().unwrap();
        let data_dir = tmp.path().join("BikeNYC").join("DATA").join("dataBikeNYC");
        create_dir_all(&data_dir).unwrap();

        let flow = random_flow(500, 21);
        let poi = random_poi(21);
        flow.write_npy(File::create(data_dir.join(FLOW_DATA_FILE)).unwrap()).unwrap();
        poi.write_npy(File::create(data_dir.join(POI_DATA_FILE)).unwrap()).unwrap();

        let config = example_config(Split::Train);
        let loaded = NycBikeDataset::new(tmp.path(), &config).unwrap();
        let direct = NycBikeDataset::from_arrays(flow, poi, &config).unwrap();

        assert_eq!(loaded.cardinality(), 232);
        assert_eq!(loaded.get(17).unwrap(), direct.get(17).unwrap());
        assert_eq!(loaded.window(Scale::Period), direct.window(Scale::Period));

        let shallow = config.with_max_search_depth(1);
        assert!(matches!(
            NycBikeDataset::new(tmp.path(), &shallow),
            Err(DatasetError::MissingDataFile { .. })
        ));
    }
}
