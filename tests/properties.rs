use arbtest::arbtest;
use tidyerr::{ErrorList, FieldErrors, Tidy};

#[test]
fn merge_matches_building_in_one_go() {
    arbtest(|u| {
        let first: Vec<(String, u16)> = u.arbitrary()?;
        let second: Vec<(String, u16)> = u.arbitrary()?;

        let mut merged: FieldErrors<u16> = first.iter().cloned().collect();
        let other: FieldErrors<u16> = second.iter().cloned().collect();
        merged.merge(&other);

        let built: FieldErrors<u16> = first.into_iter().chain(second).collect();
        assert_eq!(merged, built);
        assert_eq!(merged.to_string(), built.to_string());
        Ok(())
    });
}

#[test]
fn field_render_is_sorted() {
    arbtest(|u| {
        let pairs: Vec<(String, u8)> = u.arbitrary()?;
        let errs: FieldErrors<u8> = pairs.into_iter().collect();

        let fields: Vec<&str> = errs.fields().collect();
        let mut sorted = fields.clone();
        sorted.sort_unstable();
        assert_eq!(fields, sorted);
        assert!(errs.iter().all(|(_, payloads)| !payloads.is_empty()));
        Ok(())
    });
}

#[test]
fn field_tidy_only_collapses_when_empty() {
    arbtest(|u| {
        let pairs: Vec<(String, u8)> = u.arbitrary()?;
        let errs: FieldErrors<u8> = pairs.into_iter().collect();

        match errs.clone().tidy() {
            Ok(()) => assert!(errs.is_empty()),
            Err(tidied) => assert_eq!(tidied, errs),
        }
        assert_eq!(errs.clone().tidy(), errs.clone().tidy());
        Ok(())
    });
}

#[test]
fn splicing_matches_concatenation() {
    arbtest(|u| {
        let left: Vec<u32> = u.arbitrary()?;
        let right: Vec<u32> = u.arbitrary()?;

        let spliced = left
            .iter()
            .copied()
            .collect::<ErrorList<u32>>()
            .add(right.iter().copied().collect::<ErrorList<u32>>());

        let expected: Vec<u32> = left.into_iter().chain(right).collect();
        assert_eq!(spliced.into_vec(), expected);
        Ok(())
    });
}

#[test]
fn adding_nothing_leaves_list_unchanged() {
    arbtest(|u| {
        let errors: Vec<u32> = u.arbitrary()?;
        let list: ErrorList<u32> = errors.into_iter().collect();

        assert_eq!(list.clone().add(None), list);
        assert_eq!(list.clone().add(Ok::<(), u32>(())), list);
        assert_eq!(list.clone().add(ErrorList::new()), list);
        Ok(())
    });
}

#[test]
fn list_tidy_shape_follows_length() {
    arbtest(|u| {
        let errors: Vec<u32> = u.arbitrary()?;
        let list: ErrorList<u32> = errors.iter().copied().collect();

        match (list.clone().tidy(), errors.as_slice()) {
            (Ok(()), []) => {}
            (Err(Tidy::One(e)), [only]) => assert_eq!(e, *only),
            (Err(Tidy::Many(many)), all) => {
                assert!(all.len() > 1);
                assert_eq!(&many[..], all);
            }
            (other, all) => panic!("unexpected {other:?} for {all:?}"),
        }
        assert_eq!(list.clone().tidy(), list.clone().tidy());
        Ok(())
    });
}

#[test]
fn list_render_is_insertion_order() {
    arbtest(|u| {
        let errors: Vec<u32> = u.arbitrary()?;
        let list: ErrorList<u32> = errors.iter().copied().collect();

        let expected: Vec<String> = errors.iter().map(ToString::to_string).collect();
        assert_eq!(list.to_string(), expected.join(", "));
        Ok(())
    });
}
