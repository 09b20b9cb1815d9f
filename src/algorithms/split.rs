use crate::node::{Entry, Node};
use crate::rectangle::Rectangle;
use crate::rtree::{RTree, SplitAlgorithm};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// 节点分裂与溢出传播
impl<T> RTree<T> {
    /// 处理节点溢出
    ///
    /// 根节点溢出时创建新的索引根节点容纳两个分裂结果，树高加一；
    /// 其他节点的溢出通过 split_and_propagate 向上传播
    pub(crate) fn handle_overflow(&mut self, path: Vec<usize>) {
        if !path.is_empty() {
            self.split_and_propagate(path);
            return;
        }

        // 根节点溢出 - 分裂并创建新的根节点
        let Some(old_root) = self.root_mut().take() else {
            return;
        };
        let old_root = *old_root;
        let node_type = old_root.node_type;
        let level = old_root.level;

        let (group1, group2) = self.split_entries(old_root.entries);
        debug!(
            level,
            group1 = group1.len(),
            group2 = group2.len(),
            "root split"
        );

        let mut node1 = Node::new(node_type, level);
        node1.entries = group1;
        node1.update_mbr();

        let mut node2 = Node::new(node_type, level);
        node2.entries = group2;
        node2.update_mbr();

        let mut new_root = Node::new_index_node(level + 1);
        new_root.add_entry(Entry::Node {
            mbr: node1.mbr,
            node: Box::new(node1),
        });
        new_root.add_entry(Entry::Node {
            mbr: node2.mbr,
            node: Box::new(node2),
        });

        *self.root_mut() = Some(Box::new(new_root));
    }

    /// 分裂非根节点并在必要时向上传播溢出
    ///
    /// 原节点保留第一组条目，第二组装入新节点挂到父节点下；
    /// 父节点因此溢出时递归分裂
    pub(crate) fn split_and_propagate(&mut self, mut path: Vec<usize>) {
        let max_entries = self.max_entries_internal();

        // 提取待分裂节点的条目
        let (entries, node_type, level) = {
            let node = match self.get_last_node_mut(&path) {
                Some(node) => node,
                None => {
                    warn!("split target resolved to a missing node");
                    return;
                }
            };

            if node.entries.len() <= max_entries {
                // 实际没有溢出，只需要更新MBR
                self.adjust_tree_upward(path);
                return;
            }

            let entries = std::mem::take(&mut node.entries);
            (entries, node.node_type, node.level)
        };

        let (group1, group2) = self.split_entries(entries);
        debug!(
            level,
            group1 = group1.len(),
            group2 = group2.len(),
            "node split"
        );

        // 原节点保留第一组
        let first_mbr = {
            let node = match self.get_last_node_mut(&path) {
                Some(node) => node,
                None => {
                    warn!("split target vanished while installing groups");
                    return;
                }
            };
            node.entries = group1;
            node.update_mbr();
            node.mbr
        };

        // 第二组装入新节点
        let mut new_node = Node::new(node_type, level);
        new_node.entries = group2;
        new_node.update_mbr();
        let new_entry = Entry::Node {
            mbr: new_node.mbr,
            node: Box::new(new_node),
        };

        let Some(child_index) = path.pop() else {
            return;
        };

        if path.is_empty() {
            // 父节点是根节点
            let Some(root) = self.root_mut().as_mut() else {
                return;
            };
            if let Some(Entry::Node { mbr, .. }) = root.entries.get_mut(child_index) {
                *mbr = first_mbr;
            }
            root.add_entry(new_entry);

            if root.entries.len() > max_entries {
                self.handle_overflow(Vec::new());
            }
        } else {
            let parent = match self.get_last_node_mut(&path) {
                Some(node) => node,
                None => {
                    warn!("split lost its parent node during propagation");
                    return;
                }
            };
            if let Some(Entry::Node { mbr, .. }) = parent.entries.get_mut(child_index) {
                *mbr = first_mbr;
            }
            parent.add_entry(new_entry);

            if parent.entries.len() > max_entries {
                self.split_and_propagate(path);
            } else {
                self.adjust_tree_upward(path);
            }
        }
    }

    /// 按配置的算法将溢出节点的条目分为两组
    pub(crate) fn split_entries(&self, entries: Vec<Entry<T>>) -> (Vec<Entry<T>>, Vec<Entry<T>>) {
        match self.split_algorithm() {
            SplitAlgorithm::Quadratic => quadratic_split(entries),
            SplitAlgorithm::Linear => linear_split(entries),
            SplitAlgorithm::RStar => rstar_split(entries),
        }
    }
}

/// 二次分裂算法 - 遵循Guttman论文Algorithm QuadraticSplit
///
/// 不做最小填充强制：分配完全由扩大成本驱动，某一组可能只剩种子一个条目
fn quadratic_split<T>(mut entries: Vec<Entry<T>>) -> (Vec<Entry<T>>, Vec<Entry<T>>) {
    // QS1: 选择种子 - 找到浪费空间最大的两个条目作为两组的种子
    let (seed1, seed2) = pick_seeds(&entries);

    // 先移除索引大的，保证索引小的仍然有效
    let second = entries.remove(seed2);
    let first = entries.remove(seed1);
    let mut group1 = vec![first];
    let mut group2 = vec![second];

    // QS2/QS3: 逐个选择偏好最强的条目并分配
    while !entries.is_empty() {
        let group1_mbr = group_mbr(&group1);
        let group2_mbr = group_mbr(&group2);

        let (next_index, to_first) = pick_next(&entries, &group1_mbr, &group2_mbr);
        let entry = entries.remove(next_index);

        if to_first {
            group1.push(entry);
        } else {
            group2.push(entry);
        }
    }

    (group1, group2)
}

/// PickSeeds算法 - 选择组合后死空间最大的两个条目
///
/// 死空间 = 包含两个条目的矩形面积 - 两个条目各自的面积。
/// 并列时保留按行优先顺序先遇到的条目对。
/// 返回的索引对满足 seed1 < seed2
fn pick_seeds<T>(entries: &[Entry<T>]) -> (usize, usize) {
    let mut max_waste = f64::NEG_INFINITY;
    let mut best_pair = (0, 1);

    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let rect1 = entries[i].mbr();
            let rect2 = entries[j].mbr();

            let waste = rect1.union(rect2).area() - rect1.area() - rect2.area();
            if waste > max_waste {
                max_waste = waste;
                best_pair = (i, j);
            }
        }
    }

    best_pair
}

/// PickNext算法 - 选择下一个要分配的条目
///
/// 选择两组扩大成本差异最大的条目，分配到扩大成本较小的组；
/// 扩大成本相同时归入第一组
fn pick_next<T>(remaining: &[Entry<T>], group1_mbr: &Rectangle, group2_mbr: &Rectangle) -> (usize, bool) {
    let mut max_preference = f64::NEG_INFINITY;
    let mut best_entry = 0;
    let mut to_first = true;

    for (i, entry) in remaining.iter().enumerate() {
        let enlargement1 = group1_mbr.enlargement(entry.mbr());
        let enlargement2 = group2_mbr.enlargement(entry.mbr());

        let preference = (enlargement1 - enlargement2).abs();
        if preference > max_preference {
            max_preference = preference;
            best_entry = i;
            to_first = enlargement1 <= enlargement2;
        }
    }

    (best_entry, to_first)
}

/// 线性分裂算法
///
/// 种子选择：在每条轴上按下边界排序后取两端条目，
/// 以 last.min - first.max 作为该轴的分离度，选分离度更大的轴（并列时取X轴）。
/// 分配阶段：每次选择 min(inc1, inc2) 最小的条目归入扩大成本较小的组
fn linear_split<T>(mut entries: Vec<Entry<T>>) -> (Vec<Entry<T>>, Vec<Entry<T>>) {
    let (first_x, last_x) = extreme_indices(&entries, 0);
    let sep_x = entries[last_x].mbr().min[0] - entries[first_x].mbr().max[0];

    let (first_y, last_y) = extreme_indices(&entries, 1);
    let sep_y = entries[last_y].mbr().min[1] - entries[first_y].mbr().max[1];

    let (seed1, seed2) = if sep_x >= sep_y {
        (first_x, last_x)
    } else {
        (first_y, last_y)
    };

    // 种子可能以任意索引顺序出现，先移除较大的索引
    let high = entries.remove(seed1.max(seed2));
    let low = entries.remove(seed1.min(seed2));
    let (first_seed, second_seed) = if seed1 < seed2 { (low, high) } else { (high, low) };

    let mut group1 = vec![first_seed];
    let mut group2 = vec![second_seed];

    while !entries.is_empty() {
        let group1_mbr = group_mbr(&group1);
        let group2_mbr = group_mbr(&group2);

        let mut best_entry = 0;
        let mut best_cost = f64::INFINITY;
        let mut to_first = true;
        for (i, entry) in entries.iter().enumerate() {
            let enlargement1 = group1_mbr.enlargement(entry.mbr());
            let enlargement2 = group2_mbr.enlargement(entry.mbr());
            let cost = enlargement1.min(enlargement2);
            if cost < best_cost {
                best_cost = cost;
                best_entry = i;
                to_first = enlargement1 <= enlargement2;
            }
        }

        let entry = entries.remove(best_entry);
        if to_first {
            group1.push(entry);
        } else {
            group2.push(entry);
        }
    }

    (group1, group2)
}

/// 找到指定轴上下边界最小和最大的条目索引
///
/// 最小值取首个出现的，最大值取末个出现的，
/// 对应按该轴稳定排序后的首末条目
fn extreme_indices<T>(entries: &[Entry<T>], axis: usize) -> (usize, usize) {
    let mut first = 0;
    let mut last = 0;

    for (i, entry) in entries.iter().enumerate() {
        if entry.mbr().min[axis] < entries[first].mbr().min[axis] {
            first = i;
        }
        if entry.mbr().min[axis] >= entries[last].mbr().min[axis] {
            last = i;
        }
    }

    (first, last)
}

/// R*风格分裂算法
///
/// 轴选择：对每条轴按下边界排序，累加所有分裂位置的两侧MBR周长和，
/// 取总和较小的轴（并列时取X轴）。
/// 分裂点选择：在选中轴的排序上取两侧MBR重叠面积最小的前缀长度k，
/// k 的取值范围为 [1, n-2]，并列时取最小的k
fn rstar_split<T>(mut entries: Vec<Entry<T>>) -> (Vec<Entry<T>>, Vec<Entry<T>>) {
    let total_x = axis_perimeter_sum(&entries, 0);
    let total_y = axis_perimeter_sum(&entries, 1);
    let axis = if total_x <= total_y { 0 } else { 1 };

    entries.sort_by(|a, b| {
        a.mbr().min[axis]
            .partial_cmp(&b.mbr().min[axis])
            .unwrap_or(Ordering::Equal)
    });

    let n = entries.len();
    let mut best_k = 1;
    let mut min_overlap = f64::INFINITY;
    for k in 1..=n.saturating_sub(2) {
        let left = group_mbr(&entries[..k]);
        let right = group_mbr(&entries[k..]);
        let overlap = left.intersection_area(&right);
        if overlap < min_overlap {
            min_overlap = overlap;
            best_k = k;
        }
    }

    let group2 = entries.split_off(best_k);
    (entries, group2)
}

/// 计算指定轴上所有分裂位置的周长和
fn axis_perimeter_sum<T>(entries: &[Entry<T>], axis: usize) -> f64 {
    let mut boxes: Vec<Rectangle> = entries.iter().map(|entry| *entry.mbr()).collect();
    boxes.sort_by(|a, b| a.min[axis].partial_cmp(&b.min[axis]).unwrap_or(Ordering::Equal));

    let mut total = 0.0;
    for k in 1..boxes.len() {
        let left = combine_boxes(&boxes[..k]);
        let right = combine_boxes(&boxes[k..]);
        total += left.perimeter() + right.perimeter();
    }

    total
}

/// 计算一组条目的最小边界矩形
fn group_mbr<T>(group: &[Entry<T>]) -> Rectangle {
    let mut iter = group.iter();
    let Some(first) = iter.next() else {
        return Rectangle::default();
    };

    let mut mbr = *first.mbr();
    for entry in iter {
        mbr = mbr.union(entry.mbr());
    }
    mbr
}

/// 计算一组矩形的并集
fn combine_boxes(boxes: &[Rectangle]) -> Rectangle {
    let mut iter = boxes.iter();
    let Some(first) = iter.next() else {
        return Rectangle::default();
    };

    let mut mbr = *first;
    for rect in iter {
        mbr = mbr.union(rect);
    }
    mbr
}
