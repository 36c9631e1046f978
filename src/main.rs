use skipstore::SkipList;
use tracing_subscriber::EnvFilter;

fn main() -> skipstore::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let list = SkipList::new(32)?;
    list.insert(1, "一".to_string());
    list.insert(2, "二".to_string());
    list.insert(3, "三".to_string());
    list.insert(4, "四".to_string());
    list.insert(5, "五".to_string());
    list.insert(10, "十".to_string());
    list.insert(8, "八".to_string());
    list.insert(20, "二十".to_string());

    println!("skipList size: {}", list.size());

    for key in [10, 1, 18] {
        match list.query(&key) {
            Some(value) => println!("Found key: {}, value: {}", key, value),
            None => println!("Not Found Key: {}", key),
        }
    }

    list.dump()?;
    print!("{}", list);

    for key in [3, 7, 2] {
        println!("delete {}: {:?}", key, list.delete(&key));
    }

    println!("skipList size: {}", list.size());
    print!("{}", list);
    Ok(())
}
